// src/config.rs

use sqlx::{postgres::PgPoolOptions, PgPool};
use std::{env, time::Duration};

use crate::{
    db::{CompanyRepository, InvoiceRepository, ProductRepository, UserRepository},
    services::{
        auth::AuthService,
        company_service::CompanyService,
        dashboard_service::DashboardService,
        document_service::DocumentService,
        invoice_service::InvoiceService,
        product_service::ProductService,
    },
};

// O estado compartilhado que será acessível em toda a aplicação
#[derive(Clone)]
pub struct AppState {
    pub db_pool: PgPool,
    pub jwt_secret: String,
    pub auth_service: AuthService,
    pub company_service: CompanyService,
    pub product_service: ProductService,
    pub invoice_service: InvoiceService,
    pub dashboard_service: DashboardService,
    pub document_service: DocumentService,
}

impl AppState {
    pub async fn new() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let database_url = env::var("DATABASE_URL").expect("DATABASE_URL deve ser definida");
        let jwt_secret = env::var("JWT_SECRET").expect("JWT_SECRET deve ser definido");

        // Conecta ao banco de dados, usando '?' para propagar erros
        let db_pool = PgPoolOptions::new()
            .max_connections(5)
            .acquire_timeout(Duration::from_secs(3))
            .connect(&database_url)
            .await?;

        tracing::info!("✅ Conexão com o banco de dados estabelecida com sucesso!");

        // --- Monta o gráfico de dependências ---
        // Tudo explícito: cada serviço recebe o que usa, nada de singleton.
        let user_repo = UserRepository::new(db_pool.clone());
        let company_repo = CompanyRepository::new(db_pool.clone());
        let product_repo = ProductRepository::new(db_pool.clone());
        let invoice_repo = InvoiceRepository::new(db_pool.clone());

        let auth_service = AuthService::new(user_repo, jwt_secret.clone(), db_pool.clone());
        let company_service = CompanyService::new(db_pool.clone(), company_repo.clone());
        let product_service = ProductService::new(product_repo);
        let invoice_service =
            InvoiceService::new(db_pool.clone(), invoice_repo.clone(), company_repo.clone());
        let dashboard_service =
            DashboardService::new(invoice_repo.clone(), company_repo.clone());
        let document_service =
            DocumentService::new(db_pool.clone(), invoice_repo, company_repo);

        Ok(Self {
            db_pool,
            jwt_secret,
            auth_service,
            company_service,
            product_service,
            invoice_service,
            dashboard_service,
            document_service,
        })
    }
}
