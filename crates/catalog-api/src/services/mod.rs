//! 비즈니스 로직 서비스.
//!
//! 각 서비스는 저장소 trait을 생성자로 주입받습니다.

pub mod auth;
pub mod products;

pub use auth::AuthService;
pub use products::ProductService;
