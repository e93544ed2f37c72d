//! 입력 폼.
//!
//! 화면 입력값을 보관하고 서버 호출 전에 검증합니다.
//! 검증 실패는 `ClientError::Validation`으로 필드별 메시지를 담습니다.

use std::str::FromStr;

use catalog_core::{
    validate_price, FieldErrors, LoginRequest, NewProduct, Product, ProductPatch, RegisterRequest,
    NAME_LENGTH_MESSAGE, PRODUCT_NAME_MAX_LEN, PRODUCT_NAME_MIN_LEN,
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

use crate::error::{ClientError, ClientResult};

pub const PASSWORD_MISMATCH_MESSAGE: &str = "Passwords do not match";

// ==================== 인증 폼 ====================

/// 회원가입 폼
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
pub struct RegisterForm {
    #[validate(length(min = 1, message = "Username is required"))]
    pub username: String,
    #[validate(email(message = "Invalid email address"))]
    pub email: String,
    #[validate(length(min = 6, message = "Password must be at least 6 characters"))]
    pub password: String,
    #[validate(must_match(other = "password", message = "Passwords do not match"))]
    pub confirm_password: String,
}

impl RegisterForm {
    /// 검증 후 회원가입 요청으로 변환합니다.
    pub fn to_request(&self) -> ClientResult<RegisterRequest> {
        self.validate()?;
        Ok(RegisterRequest {
            username: self.username.trim().to_string(),
            email: self.email.trim().to_string(),
            password: self.password.clone(),
        })
    }
}

/// 로그인 폼
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
pub struct LoginForm {
    #[validate(length(min = 1, message = "Email is required"))]
    pub email: String,
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

impl LoginForm {
    pub fn to_request(&self) -> ClientResult<LoginRequest> {
        self.validate()?;
        Ok(LoginRequest {
            email: self.email.trim().to_string(),
            password: self.password.clone(),
        })
    }
}

// ==================== 상품 폼 ====================

pub const PRICE_NOT_NUMBER_MESSAGE: &str = "Price must be a number";

fn parse_price(value: &str) -> Option<Decimal> {
    Decimal::from_str(value.trim()).ok()
}

/// 텍스트 가격 검증. 숫자로 해석된 뒤 도메인 가격 범위를 적용합니다.
fn validate_price_text(value: &str) -> Result<(), ValidationError> {
    let price = parse_price(value).ok_or_else(|| {
        ValidationError::new("price_not_number").with_message(PRICE_NOT_NUMBER_MESSAGE.into())
    })?;
    validate_price(&price)
}

/// 앞뒤 공백을 제외한 이름 길이 검증. 서버에는 잘라낸 이름이 전송됩니다.
fn validate_name_text(value: &str) -> Result<(), ValidationError> {
    let len = value.trim().chars().count() as u64;
    if !(PRODUCT_NAME_MIN_LEN..=PRODUCT_NAME_MAX_LEN).contains(&len) {
        return Err(ValidationError::new("length").with_message(NAME_LENGTH_MESSAGE.into()));
    }
    Ok(())
}

/// 상품 생성/수정 폼.
///
/// 가격은 입력 그대로의 텍스트로 보관합니다.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
pub struct ProductForm {
    #[validate(custom(function = "validate_name_text"))]
    pub name: String,
    #[validate(custom(function = "validate_price_text"))]
    pub price: String,
    pub description: String,
}

impl ProductForm {
    pub fn new(
        name: impl Into<String>,
        price: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            price: price.into(),
            description: description.into(),
        }
    }

    /// 기존 상품을 편집용으로 불러옵니다.
    pub fn from_product(product: &Product) -> Self {
        Self {
            name: product.name.clone(),
            price: product.price.to_string(),
            description: product.description.clone().unwrap_or_default(),
        }
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    fn parsed(&self) -> ClientResult<(String, Decimal, Option<String>)> {
        self.validate()?;
        let price = parse_price(&self.price).ok_or_else(|| {
            let mut fields = FieldErrors::new();
            fields.add("price", PRICE_NOT_NUMBER_MESSAGE);
            ClientError::Validation(fields)
        })?;
        let description = Some(self.description.trim().to_string()).filter(|d| !d.is_empty());
        Ok((self.name.trim().to_string(), price, description))
    }

    /// 생성 요청으로 변환합니다. 빈 설명은 생략됩니다.
    pub fn to_new_product(&self) -> ClientResult<NewProduct> {
        let (name, price, description) = self.parsed()?;
        Ok(NewProduct {
            name,
            price,
            description,
        })
    }

    /// 수정 요청으로 변환합니다. 폼의 모든 필드를 전송합니다.
    ///
    /// 빈 설명은 `null`로 전송되어 기존 설명을 지웁니다.
    pub fn to_patch(&self) -> ClientResult<ProductPatch> {
        let (name, price, description) = self.parsed()?;
        Ok(ProductPatch {
            name: Some(name),
            price: Some(price),
            description: Some(description),
        })
    }
}
