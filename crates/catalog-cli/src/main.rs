//! 상품 카탈로그 CLI.
//!
//! # 사용 예시
//!
//! ```bash
//! # 회원가입 / 로그인 (토큰은 세션 파일에 1일간 저장)
//! catalog register -u alice -e alice@example.com -p 'Passw0rd!'
//! catalog login -e alice@example.com -p 'Passw0rd!'
//!
//! # 상품 관리
//! catalog products list
//! catalog products create -n "Desk Lamp" --price 49.99 -d "LED"
//! catalog products update <ID> --price 20
//! catalog products delete <ID> --yes
//! ```

use std::sync::Arc;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing::error;
use uuid::Uuid;

use catalog_cli::commands::{auth, products};
use catalog_client::{CatalogClient, FileSessionStore, LoginForm, ProductForm, RegisterForm};
use catalog_core::{init_logging, LogConfig, LogFormat};

#[derive(Parser)]
#[command(name = "catalog")]
#[command(about = "Product catalog CLI - 상품 카탈로그 관리 도구", long_about = None)]
#[command(version)]
struct Cli {
    /// API 서버 주소
    #[arg(long, env = "CATALOG_API_URL", default_value = "http://localhost:3000", global = true)]
    api_url: String,

    /// 세션 쿠키 파일 경로
    #[arg(long, env = "CATALOG_SESSION_FILE", default_value = ".catalog-session.json", global = true)]
    session_file: String,

    /// 상세 로그 출력
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// 회원가입
    Register {
        /// 사용자 이름
        #[arg(short, long)]
        username: String,

        /// 이메일
        #[arg(short, long)]
        email: String,

        /// 비밀번호
        #[arg(short, long)]
        password: String,

        /// 비밀번호 확인 (생략 시 --password와 동일)
        #[arg(long)]
        confirm_password: Option<String>,
    },

    /// 로그인
    Login {
        /// 이메일
        #[arg(short, long)]
        email: String,

        /// 비밀번호
        #[arg(short, long)]
        password: String,
    },

    /// 로그아웃 (세션 파일 삭제)
    Logout,

    /// 세션 상태 확인
    Status,

    /// 상품 관리
    Products {
        #[command(subcommand)]
        command: ProductCommands,
    },
}

#[derive(Subcommand)]
enum ProductCommands {
    /// 전체 상품 조회
    List {
        /// 출력 형식 (table, json)
        #[arg(short, long, default_value = "table")]
        format: String,
    },

    /// 상품 상세 조회
    Get {
        /// 상품 ID
        id: Uuid,
    },

    /// 상품 생성 (로그인 필요)
    Create {
        /// 상품 이름 (3-50자)
        #[arg(short, long)]
        name: String,

        /// 가격 (0.01 ~ 1,000,000)
        #[arg(long)]
        price: String,

        /// 설명
        #[arg(short, long, default_value = "")]
        description: String,
    },

    /// 상품 부분 수정
    Update {
        /// 상품 ID
        id: Uuid,

        #[arg(short, long)]
        name: Option<String>,

        #[arg(long)]
        price: Option<String>,

        #[arg(short, long)]
        description: Option<String>,
    },

    /// 상품 삭제 (로그인 필요)
    Delete {
        /// 상품 ID
        id: Uuid,

        /// 확인 없이 삭제
        #[arg(short, long, default_value = "false")]
        yes: bool,
    },
}

async fn run(cli: Cli) -> Result<()> {
    let session = Arc::new(FileSessionStore::new(&cli.session_file));
    let client = CatalogClient::new(cli.api_url, session);

    match cli.command {
        Commands::Register {
            username,
            email,
            password,
            confirm_password,
        } => {
            let confirm_password = confirm_password.unwrap_or_else(|| password.clone());
            let form = RegisterForm {
                username,
                email,
                password,
                confirm_password,
            };
            auth::register(&client, form).await
        }

        Commands::Login { email, password } => {
            auth::login(&client, LoginForm { email, password }).await
        }

        Commands::Logout => auth::logout(&client),

        Commands::Status => auth::status(&client),

        Commands::Products { command } => match command {
            ProductCommands::List { format } => {
                let format = products::OutputFormat::parse(&format)?;
                let count = products::list(&client, format).await?;
                if format == products::OutputFormat::Table {
                    println!("\n총 {}개 상품", count);
                }
                Ok(())
            }
            ProductCommands::Get { id } => products::get(&client, id).await,
            ProductCommands::Create {
                name,
                price,
                description,
            } => products::create(&client, ProductForm::new(name, price, description)).await,
            ProductCommands::Update {
                id,
                name,
                price,
                description,
            } => {
                let patch = products::build_patch(name, price, description)?;
                products::update(&client, id, patch).await
            }
            ProductCommands::Delete { id, yes } => products::delete(&client, id, yes).await,
        },
    }
}

#[tokio::main]
async fn main() {
    let _ = dotenvy::dotenv();
    let cli = Cli::parse();

    let level = if cli.verbose { "catalog_client=debug,catalog_cli=debug" } else { "warn" };
    if let Err(e) = init_logging(LogConfig::new(level).with_format(LogFormat::Compact)) {
        eprintln!("Failed to initialize logging: {}", e);
    }

    if let Err(e) = run(cli).await {
        error!(error = %e, "Command failed");
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}
