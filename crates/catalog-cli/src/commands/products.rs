//! 상품 명령 (list, get, create, update, delete).

use std::io::{self, BufRead, Write};
use std::str::FromStr;

use anyhow::{Context, Result};
use catalog_client::{CatalogClient, ProductForm};
use catalog_core::{Product, ProductPatch};
use rust_decimal::Decimal;
use tracing::info;
use uuid::Uuid;

use super::client_error;

/// 출력 형식.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Table,
    Json,
}

impl OutputFormat {
    pub fn parse(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "table" => Ok(Self::Table),
            "json" => Ok(Self::Json),
            _ => Err(anyhow::anyhow!("Invalid format: {}. Use: table, json", s)),
        }
    }
}

/// 상품 목록을 표 형태로 만듭니다.
pub fn format_table(products: &[Product]) -> String {
    let mut out = format!("{:<36}  {:<30}  {:>12}  {}\n", "ID", "NAME", "PRICE", "DESCRIPTION");
    for p in products {
        out.push_str(&format!(
            "{:<36}  {:<30}  {:>12}  {}\n",
            p.id,
            p.name,
            p.price,
            p.description.as_deref().unwrap_or("-")
        ));
    }
    out
}

fn print_product(product: &Product) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(product)?);
    Ok(())
}

/// 전체 상품 조회.
pub async fn list(client: &CatalogClient, format: OutputFormat) -> Result<usize> {
    let products = client.products.get_all().await.map_err(client_error)?;

    match format {
        OutputFormat::Table => print!("{}", format_table(&products)),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&products)?),
    }
    Ok(products.len())
}

pub async fn get(client: &CatalogClient, id: Uuid) -> Result<()> {
    let product = client.products.get_by_id(id).await.map_err(client_error)?;
    print_product(&product)
}

/// 상품 생성 (로그인 필요).
pub async fn create(client: &CatalogClient, form: ProductForm) -> Result<()> {
    let input = form.to_new_product().map_err(client_error)?;
    let product = client.products.create(&input).await.map_err(client_error)?;

    info!(product_id = %product.id, "Product created");
    print_product(&product)
}

/// 지정된 필드만 담은 수정 요청을 만듭니다.
///
/// 빈 설명(`--description ""`)은 기존 설명을 지웁니다.
pub fn build_patch(
    name: Option<String>,
    price: Option<String>,
    description: Option<String>,
) -> Result<ProductPatch> {
    let price = price
        .map(|p| Decimal::from_str(p.trim()).context("Price must be a number"))
        .transpose()?;

    let patch = ProductPatch {
        name,
        price,
        description: description.map(|d| Some(d).filter(|d| !d.trim().is_empty())),
    };
    if patch.is_empty() {
        anyhow::bail!("Nothing to update. Use --name, --price or --description");
    }
    Ok(patch)
}

/// 상품 부분 수정.
pub async fn update(client: &CatalogClient, id: Uuid, patch: ProductPatch) -> Result<()> {
    let product = client
        .products
        .update(id, &patch)
        .await
        .map_err(client_error)?;
    print_product(&product)
}

/// y/yes 응답인지 확인합니다.
pub fn is_confirmed(answer: &str) -> bool {
    matches!(answer.trim().to_lowercase().as_str(), "y" | "yes")
}

fn confirm(prompt: &str) -> Result<bool> {
    print!("{} [y/N] ", prompt);
    io::stdout().flush()?;

    let mut answer = String::new();
    io::stdin().lock().read_line(&mut answer)?;
    Ok(is_confirmed(&answer))
}

/// 상품 삭제 (로그인 필요). `yes`가 아니면 확인을 묻습니다.
pub async fn delete(client: &CatalogClient, id: Uuid, yes: bool) -> Result<()> {
    if !yes && !confirm(&format!("Delete product {}?", id))? {
        println!("취소되었습니다");
        return Ok(());
    }

    client.products.delete(id).await.map_err(client_error)?;
    println!("삭제 완료: {}", id);
    Ok(())
}
