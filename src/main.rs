use anyhow::Context;
use clap::Parser;
use spoke_calc::utils::{logger, validation::Validate};
use spoke_calc::{render, CalculationEngine, CliConfig, LayeredConfig, SpokeError};
use std::io::Write;

fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();

    // 初始化日誌
    if cli.log_json {
        logger::init_json_logger(cli.verbose);
    } else {
        logger::init_cli_logger(cli.verbose);
    }

    tracing::info!("Starting spoke-calc");
    if cli.verbose {
        tracing::debug!("CLI config: {:?}", cli);
    }

    let report = match run(cli) {
        Ok(report) => report,
        Err(e) => {
            // 記錄詳細錯誤信息
            tracing::error!(
                "❌ Calculation failed: {} (Category: {:?}, Severity: {:?})",
                e,
                e.category(),
                e.severity()
            );
            tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());

            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 Suggestion: {}", e.recovery_suggestion());
            std::process::exit(e.exit_code());
        }
    };

    let mut stdout = std::io::stdout().lock();
    writeln!(stdout, "{}", report.trim_end()).context("writing report to stdout")?;

    Ok(())
}

fn run(cli: CliConfig) -> Result<String, SpokeError> {
    let config = LayeredConfig::load(cli)?;
    config.validate()?;

    let format = config.output_format();
    let engine = CalculationEngine::new(config);
    let calculation = engine.run()?;

    tracing::info!("✅ Spoke lengths computed");
    render(&calculation, format)
}
