use async_graphql::Schema;
use async_graphql_axum::{GraphQLRequest, GraphQLResponse, GraphQLSubscription};
use axum::{Extension, Router, routing::get};
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::trace::TraceLayer;
use tracing_subscriber::{EnvFilter, fmt};

use event_planner::bus::event_bus::EventBus;
use event_planner::config::AppConfig;
use event_planner::seed::{self, SeedDocument};
use event_planner::store::Store;

mod schema;
use schema::{AppSchema, AppState, MutationRoot, QueryRoot, SubscriptionRoot};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();

    let config = AppConfig::from_env()?;

    let store = Store::new();
    if config.seed_path.exists() {
        let document = SeedDocument::from_file(&config.seed_path)?;
        seed::load(&store, document).await;
    } else {
        tracing::warn!(
            path = %config.seed_path.display(),
            "seed document not found, starting empty"
        );
    }

    let bus = Arc::new(EventBus::new());
    let state = AppState::new(store, bus, config.subscriptions);

    let schema: AppSchema = Schema::build(QueryRoot, MutationRoot, SubscriptionRoot)
        .data(state)
        .finish();

    let app = Router::new()
        .route("/gql", get(graphiql).post(graphql))
        .route_service("/gql/ws", GraphQLSubscription::new(schema.clone()))
        .layer(Extension(schema))
        .layer(TraceLayer::new_for_http());

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    tracing::info!("GraphQL endpoint: http://{}/gql", addr);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}

async fn graphql(Extension(schema): Extension<AppSchema>, req: GraphQLRequest) -> GraphQLResponse {
    schema.execute(req.into_inner()).await.into()
}

async fn graphiql() -> axum::response::Html<String> {
    use async_graphql::http::GraphiQLSource;
    axum::response::Html(
        GraphiQLSource::build()
            .endpoint("/gql")
            .subscription_endpoint("/gql/ws")
            .finish(),
    )
}
