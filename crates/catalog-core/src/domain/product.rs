//! 상품 도메인 모델.
//!
//! 상품 레코드와 생성/수정 입력 타입, 그리고 공통 검증 규칙을 정의합니다.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Deserializer, Serialize};
use uuid::Uuid;
use validator::{Validate, ValidationError};

/// 상품 이름 최소 길이 (문자 수)
pub const PRODUCT_NAME_MIN_LEN: u64 = 3;
/// 상품 이름 최대 길이 (문자 수)
pub const PRODUCT_NAME_MAX_LEN: u64 = 50;
/// 최소 가격
pub const PRODUCT_PRICE_MIN: Decimal = dec!(0.01);
/// 최대 가격
pub const PRODUCT_PRICE_MAX: Decimal = dec!(1000000);

pub const NAME_LENGTH_MESSAGE: &str = "Name must be between 3 and 50 characters long";
pub const PRICE_TOO_LOW_MESSAGE: &str = "Price must be greater than 0";
pub const PRICE_TOO_HIGH_MESSAGE: &str = "Price must be less than 1,000,000";

/// 가격 범위 검증 (0.01 ~ 1,000,000).
///
/// 참고: `Option<Decimal>` 필드에 사용 시 validator가 Some일 때만 호출하므로 &Decimal을 받음
pub fn validate_price(value: &Decimal) -> Result<(), ValidationError> {
    if *value < PRODUCT_PRICE_MIN {
        return Err(ValidationError::new("price_too_small")
            .with_message(PRICE_TOO_LOW_MESSAGE.into()));
    }
    if *value > PRODUCT_PRICE_MAX {
        return Err(ValidationError::new("price_too_large")
            .with_message(PRICE_TOO_HIGH_MESSAGE.into()));
    }
    Ok(())
}

/// 저장된 상품 레코드.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx-support", derive(sqlx::FromRow))]
#[cfg_attr(feature = "utoipa-support", derive(utoipa::ToSchema))]
pub struct Product {
    /// 상품 ID (생성 시 발급)
    pub id: Uuid,
    /// 상품 이름
    pub name: String,
    /// 가격
    pub price: Decimal,
    /// 설명 (선택)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl Product {
    /// 생성 입력으로부터 새 상품을 만듭니다. ID는 여기서 발급됩니다.
    pub fn create(input: NewProduct) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: input.name,
            price: input.price,
            description: input.description,
        }
    }

    /// 부분 수정을 병합합니다. 전달된 필드만 바뀝니다.
    pub fn apply(&mut self, patch: ProductPatch) {
        if let Some(name) = patch.name {
            self.name = name;
        }
        if let Some(price) = patch.price {
            self.price = price;
        }
        if let Some(description) = patch.description {
            self.description = description;
        }
    }
}

/// 상품 생성 입력
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[cfg_attr(feature = "utoipa-support", derive(utoipa::ToSchema))]
#[serde(deny_unknown_fields)]
pub struct NewProduct {
    /// 상품 이름 (3-50자)
    #[validate(length(
        min = PRODUCT_NAME_MIN_LEN,
        max = PRODUCT_NAME_MAX_LEN,
        message = "Name must be between 3 and 50 characters long"
    ))]
    pub name: String,
    /// 가격 (0.01 ~ 1,000,000)
    #[validate(custom(function = "validate_price"))]
    pub price: Decimal,
    /// 설명 (선택)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// 필드가 없으면 `None`, `null`이면 `Some(None)`이 되도록 역직렬화합니다.
fn present_or_null<'de, T, D>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

/// 상품 부분 수정 입력
///
/// 각 필드는 값이 있을 때만 검증됩니다.
/// `description`은 `null`을 보내면 지워집니다.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
#[cfg_attr(feature = "utoipa-support", derive(utoipa::ToSchema))]
#[serde(deny_unknown_fields)]
pub struct ProductPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(length(
        min = PRODUCT_NAME_MIN_LEN,
        max = PRODUCT_NAME_MAX_LEN,
        message = "Name must be between 3 and 50 characters long"
    ))]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(custom(function = "validate_price"))]
    pub price: Option<Decimal>,
    #[serde(
        default,
        deserialize_with = "present_or_null",
        skip_serializing_if = "Option::is_none"
    )]
    #[cfg_attr(feature = "utoipa-support", schema(value_type = Option<String>))]
    pub description: Option<Option<String>>,
}

impl ProductPatch {
    /// 변경할 필드가 하나도 없는지 확인합니다.
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.price.is_none() && self.description.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_product(name: &str, price: Decimal) -> NewProduct {
        NewProduct {
            name: name.to_string(),
            price,
            description: None,
        }
    }

    #[test]
    fn test_valid_product_bounds() {
        assert!(new_product("abc", dec!(0.01)).validate().is_ok());
        assert!(new_product(&"x".repeat(50), dec!(1000000)).validate().is_ok());
        assert!(new_product("Desk Lamp", dec!(49.99)).validate().is_ok());
    }

    #[test]
    fn test_name_too_short_or_long() {
        let errors = new_product("ab", dec!(10)).validate().unwrap_err();
        assert!(errors.field_errors().contains_key("name"));

        let errors = new_product(&"x".repeat(51), dec!(10)).validate().unwrap_err();
        assert!(errors.field_errors().contains_key("name"));
    }

    #[test]
    fn test_name_length_counts_characters() {
        // 멀티바이트 문자도 한 글자로 계산
        assert!(new_product("책상램", dec!(10)).validate().is_ok());
    }

    #[test]
    fn test_price_out_of_range() {
        let errors = new_product("Chair", Decimal::ZERO).validate().unwrap_err();
        let price_errors = errors.field_errors();
        let message = price_errors["price"][0].message.as_ref().unwrap();
        assert_eq!(message, PRICE_TOO_LOW_MESSAGE);

        let errors = new_product("Chair", dec!(1000000.01)).validate().unwrap_err();
        let price_errors = errors.field_errors();
        let message = price_errors["price"][0].message.as_ref().unwrap();
        assert_eq!(message, PRICE_TOO_HIGH_MESSAGE);
    }

    #[test]
    fn test_patch_validates_only_present_fields() {
        assert!(ProductPatch::default().validate().is_ok());

        let patch = ProductPatch {
            price: Some(dec!(20)),
            ..Default::default()
        };
        assert!(patch.validate().is_ok());

        let patch = ProductPatch {
            name: Some("no".to_string()),
            ..Default::default()
        };
        assert!(patch.validate().is_err());
    }

    #[test]
    fn test_apply_merges_supplied_fields() {
        let mut product = Product::create(NewProduct {
            name: "Desk Lamp".to_string(),
            price: dec!(49.99),
            description: Some("LED".to_string()),
        });
        let id = product.id;

        product.apply(ProductPatch {
            price: Some(dec!(20)),
            ..Default::default()
        });

        assert_eq!(product.id, id);
        assert_eq!(product.name, "Desk Lamp");
        assert_eq!(product.price, dec!(20));
        assert_eq!(product.description.as_deref(), Some("LED"));
    }

    #[test]
    fn test_apply_clears_description() {
        let mut product = Product::create(NewProduct {
            name: "Desk Lamp".to_string(),
            price: dec!(49.99),
            description: Some("LED".to_string()),
        });

        product.apply(ProductPatch {
            description: Some(None),
            ..Default::default()
        });

        assert_eq!(product.name, "Desk Lamp");
        assert!(product.description.is_none());
    }

    #[test]
    fn test_patch_description_null_vs_missing() {
        let patch: ProductPatch = serde_json::from_str(r#"{"description":null}"#).unwrap();
        assert_eq!(patch.description, Some(None));
        assert!(!patch.is_empty());

        let patch: ProductPatch = serde_json::from_str(r#"{"description":"LED"}"#).unwrap();
        assert_eq!(patch.description, Some(Some("LED".to_string())));

        let patch: ProductPatch = serde_json::from_str(r#"{"name":"Chair"}"#).unwrap();
        assert_eq!(patch.description, None);

        let json = serde_json::to_value(ProductPatch {
            description: Some(None),
            ..Default::default()
        })
        .unwrap();
        assert_eq!(json, serde_json::json!({ "description": null }));
    }

    #[test]
    fn test_unknown_fields_rejected() {
        let result: Result<NewProduct, _> =
            serde_json::from_str(r#"{"name":"Chair","price":10,"stock":3}"#);
        assert!(result.is_err());

        let patch: ProductPatch = serde_json::from_str(r#"{"price":20}"#).unwrap();
        assert_eq!(patch.price, Some(dec!(20)));
        assert!(patch.name.is_none());
    }
}
