use chrono::Utc;
use clap::Args;
use optica_core::config::{AppConfig, LoadOptions, LogFormat};
use optica_core::{recommend, MatchedUseCase, QuizAnswers, Recommendation, UseCaseCode};
use optica_db::{connect_from_config, CatalogProvider, SqlCatalogProvider};
use rust_decimal::Decimal;
use serde::Serialize;
use uuid::Uuid;

use crate::commands::CommandResult;

#[derive(Args, Debug)]
pub struct RecommendArgs {
    /// Sphere power of the prescription, in diopters (e.g. -2.5).
    #[arg(long, allow_hyphen_values = true, value_name = "DIOPTERS")]
    pub sph: f64,
    /// Cylinder power of the prescription, in diopters (e.g. -0.75).
    #[arg(long, allow_hyphen_values = true, value_name = "DIOPTERS")]
    pub cyl: f64,
    /// Use-case code to score against; repeat the flag for several.
    #[arg(long = "use-case", value_name = "CODE")]
    pub use_cases: Vec<String>,
    /// Inclusive lower bound on the product's selling price.
    #[arg(long, value_name = "AMOUNT")]
    pub budget_min: Option<Decimal>,
    /// Inclusive upper bound on the product's selling price.
    #[arg(long, value_name = "AMOUNT")]
    pub budget_max: Option<Decimal>,
    /// Show at most this many ranked entries.
    #[arg(long, value_name = "N")]
    pub limit: Option<usize>,
    /// Emit a machine-readable JSON report instead of the ranked list.
    #[arg(long)]
    pub json: bool,
}

pub fn run(args: &RecommendArgs) -> CommandResult {
    let config = match AppConfig::load(LoadOptions::default()) {
        Ok(config) => config,
        Err(error) => {
            return CommandResult::failure(
                "recommend",
                "config_validation",
                format!("configuration issue: {error}"),
                2,
            );
        }
    };

    init_logging(&config);

    let runtime = match tokio::runtime::Builder::new_current_thread().enable_all().build() {
        Ok(runtime) => runtime,
        Err(error) => {
            return CommandResult::failure(
                "recommend",
                "runtime_init",
                format!("failed to initialize async runtime: {error}"),
                3,
            );
        }
    };

    let correlation_id = Uuid::new_v4().to_string();
    let answers = QuizAnswers::new(args.sph, args.cyl)
        .with_use_cases(args.use_cases.iter().map(UseCaseCode::new).collect())
        .with_budget(args.budget_min, args.budget_max);

    tracing::info!(
        event_name = "recommend.query.started",
        correlation_id = %correlation_id,
        sphere = args.sph,
        cylinder = args.cyl,
        use_case_count = answers.use_cases.len(),
        "ranking catalog against quiz answers"
    );

    let result = runtime.block_on(async {
        let pool = connect_from_config(&config.database)
            .await
            .map_err(|error| ("db_connectivity", error.to_string(), 4u8))?;

        let provider = SqlCatalogProvider::new(pool.clone());
        let catalog = provider
            .fetch_active_products_with_tiers_and_scores()
            .await
            .map_err(|error| ("catalog_fetch", error.to_string(), 5u8));

        pool.close().await;
        catalog
    });

    let catalog = match result {
        Ok(catalog) => catalog,
        Err((error_class, message, exit_code)) => {
            return CommandResult::failure("recommend", error_class, message, exit_code);
        }
    };

    let ranked = recommend(&catalog, &answers);

    tracing::info!(
        event_name = "recommend.query.completed",
        correlation_id = %correlation_id,
        candidate_count = catalog.len(),
        ranked_count = ranked.len(),
        "ranked catalog against quiz answers"
    );

    let shown = args.limit.unwrap_or(ranked.len()).min(ranked.len());
    let output = if args.json {
        render_json(args, &correlation_id, catalog.len(), &ranked, shown)
    } else {
        render_human(args, catalog.len(), &ranked, shown)
    };

    CommandResult { exit_code: 0, output }
}

fn init_logging(config: &AppConfig) {
    use tracing::Level;

    let log_level = config.logging.level.parse::<Level>().unwrap_or(Level::INFO);

    // try_init: the subscriber survives for the process, so a second command
    // in the same process must not panic here.
    let _ = match config.logging.format {
        LogFormat::Compact => tracing_subscriber::fmt()
            .with_target(false)
            .with_max_level(log_level)
            .compact()
            .try_init(),
        LogFormat::Pretty => tracing_subscriber::fmt()
            .with_target(false)
            .with_max_level(log_level)
            .pretty()
            .try_init(),
        LogFormat::Json => tracing_subscriber::fmt()
            .with_target(false)
            .with_max_level(log_level)
            .json()
            .try_init(),
    };
}

#[derive(Debug, Serialize)]
struct RecommendReport<'a> {
    command: &'static str,
    status: &'static str,
    correlation_id: &'a str,
    generated_at: String,
    prescription: PrescriptionEcho,
    requested_use_cases: &'a [String],
    budget_min: Option<Decimal>,
    budget_max: Option<Decimal>,
    candidate_count: usize,
    ranked_count: usize,
    recommendations: Vec<RecommendationEntry<'a>>,
}

#[derive(Debug, Serialize)]
struct PrescriptionEcho {
    sphere: f64,
    cylinder: f64,
}

#[derive(Debug, Serialize)]
struct RecommendationEntry<'a> {
    rank: usize,
    product_id: &'a str,
    name: &'a str,
    total_score: u8,
    quoted_price: Decimal,
    tier_type: &'static str,
    lead_time_days: u32,
    reasoning: &'a str,
    matched_use_cases: &'a [MatchedUseCase],
}

fn render_json(
    args: &RecommendArgs,
    correlation_id: &str,
    candidate_count: usize,
    ranked: &[Recommendation],
    shown: usize,
) -> String {
    let recommendations = ranked
        .iter()
        .take(shown)
        .enumerate()
        .map(|(index, entry)| RecommendationEntry {
            rank: index + 1,
            product_id: &entry.product.id.0,
            name: &entry.product.name,
            total_score: entry.total_score,
            quoted_price: entry.quoted_price(),
            tier_type: entry.available_tier.tier_type.as_str(),
            lead_time_days: entry.available_tier.lead_time_days,
            reasoning: &entry.reasoning,
            matched_use_cases: &entry.matched_use_cases,
        })
        .collect();

    let report = RecommendReport {
        command: "recommend",
        status: "ok",
        correlation_id,
        generated_at: Utc::now().to_rfc3339(),
        prescription: PrescriptionEcho { sphere: args.sph, cylinder: args.cyl },
        requested_use_cases: &args.use_cases,
        budget_min: args.budget_min,
        budget_max: args.budget_max,
        candidate_count,
        ranked_count: ranked.len(),
        recommendations,
    };

    serde_json::to_string_pretty(&report).unwrap_or_else(|error| {
        format!(
            "{{\"command\":\"recommend\",\"status\":\"error\",\"error_class\":\"serialization\",\"message\":\"{}\"}}",
            error.to_string().replace('\\', "\\\\").replace('"', "\\\"")
        )
    })
}

fn render_human(
    args: &RecommendArgs,
    candidate_count: usize,
    ranked: &[Recommendation],
    shown: usize,
) -> String {
    if ranked.is_empty() {
        return format!(
            "no active lens covers sph {} / cyl {} within the requested constraints",
            args.sph, args.cyl
        );
    }

    let mut lines = vec![format!(
        "ranked {} of {} active lenses for sph {} / cyl {}:",
        ranked.len(),
        candidate_count,
        args.sph,
        args.cyl
    )];

    for (index, entry) in ranked.iter().take(shown).enumerate() {
        lines.push(format!(
            "{:>3}. {} [{}/100] {}đ ({})",
            index + 1,
            entry.product.name,
            entry.total_score,
            entry.quoted_price(),
            entry.available_tier.tier_type.as_str()
        ));
        lines.push(format!("     {}", entry.reasoning));
    }

    if shown < ranked.len() {
        lines.push(format!("(showing first {} of {} entries)", shown, ranked.len()));
    }

    lines.join("\n")
}
