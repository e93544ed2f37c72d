//! 도메인 모델.
//!
//! - [`product`]: 상품, 생성 입력, 부분 수정
//! - [`user`]: 사용자, 회원가입/로그인 요청

pub mod product;
pub mod user;

pub use product::*;
pub use user::*;
