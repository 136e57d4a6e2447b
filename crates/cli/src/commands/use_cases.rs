use optica_core::config::{AppConfig, LoadOptions};
use optica_core::UseCase;
use optica_db::{connect_from_config, SqlCatalogProvider};
use serde::Serialize;

use crate::commands::CommandResult;

pub fn run(json_output: bool) -> CommandResult {
    let config = match AppConfig::load(LoadOptions::default()) {
        Ok(config) => config,
        Err(error) => {
            return CommandResult::failure(
                "use-cases",
                "config_validation",
                format!("configuration issue: {error}"),
                2,
            );
        }
    };

    let runtime = match tokio::runtime::Builder::new_current_thread().enable_all().build() {
        Ok(runtime) => runtime,
        Err(error) => {
            return CommandResult::failure(
                "use-cases",
                "runtime_init",
                format!("failed to initialize async runtime: {error}"),
                3,
            );
        }
    };

    let result = runtime.block_on(async {
        let pool = connect_from_config(&config.database)
            .await
            .map_err(|error| ("db_connectivity", error.to_string(), 4u8))?;

        let provider = SqlCatalogProvider::new(pool.clone());
        let use_cases = provider
            .fetch_use_cases()
            .await
            .map_err(|error| ("catalog_fetch", error.to_string(), 5u8));

        pool.close().await;
        use_cases
    });

    let use_cases = match result {
        Ok(use_cases) => use_cases,
        Err((error_class, message, exit_code)) => {
            return CommandResult::failure("use-cases", error_class, message, exit_code);
        }
    };

    let output =
        if json_output { render_json(&use_cases) } else { render_human(&use_cases) };
    CommandResult { exit_code: 0, output }
}

#[derive(Debug, Serialize)]
struct UseCaseReport<'a> {
    command: &'static str,
    status: &'static str,
    count: usize,
    use_cases: &'a [UseCase],
}

fn render_json(use_cases: &[UseCase]) -> String {
    let report = UseCaseReport {
        command: "use-cases",
        status: "ok",
        count: use_cases.len(),
        use_cases,
    };

    serde_json::to_string_pretty(&report).unwrap_or_else(|error| {
        format!(
            "{{\"command\":\"use-cases\",\"status\":\"error\",\"error_class\":\"serialization\",\"message\":\"{}\"}}",
            error.to_string().replace('\\', "\\\\").replace('"', "\\\"")
        )
    })
}

fn render_human(use_cases: &[UseCase]) -> String {
    if use_cases.is_empty() {
        return "no use cases found; run `optica seed` to load the demo catalog".to_string();
    }

    let mut lines = vec![format!("{} use cases available to the quiz:", use_cases.len())];
    for use_case in use_cases {
        let mut line = format!("- {}: {}", use_case.code.0, use_case.name);
        if let Some(description) = &use_case.description {
            line.push_str(&format!(" ({description})"));
        }
        lines.push(line);
    }

    lines.join("\n")
}
