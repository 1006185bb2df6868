use clap::Parser;
use monastery_catalog::adapters::render::{
    render_detail, render_guide_reply, render_list, render_reviews,
};
use monastery_catalog::config::{cli::QueryArgs, Overrides};
use monastery_catalog::core::reviews::{parse_star_filter, rating_summary, select_reviews, ReviewSort};
use monastery_catalog::domain::ports::Storage;
use monastery_catalog::utils::error::ErrorSeverity;
use monastery_catalog::utils::logger;
use monastery_catalog::{
    BuiltinSource, Catalog, CatalogEngine, Cli, Commands, Guide, JsonFileSource, Language,
    LocalStorage, Result, Settings, TomlConfig,
};

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // 初始化日誌
    if cli.log_json {
        logger::init_json_logger();
    } else {
        logger::init_cli_logger(cli.verbose);
    }
    tracing::debug!("CLI arguments: {:?}", cli);

    if let Err(e) = run(cli).await {
        tracing::error!(
            "❌ Command failed: {} (Category: {:?}, Severity: {:?})",
            e,
            e.category(),
            e.severity()
        );
        eprintln!("❌ {}", e.user_friendly_message());
        eprintln!("💡 Suggestion: {}", e.recovery_suggestion());

        // 根據錯誤嚴重程度決定退出碼
        let exit_code = match e.severity() {
            ErrorSeverity::Low => 0,
            ErrorSeverity::Medium => 2,
            ErrorSeverity::High => 1,
            ErrorSeverity::Critical => 3,
        };
        if exit_code > 0 {
            std::process::exit(exit_code);
        }
    }
}

fn load_settings(cli: &Cli, overrides: &Overrides) -> Result<Settings> {
    let settings = match &cli.config {
        Some(path) => {
            tracing::info!("📁 Loading configuration from: {}", path);
            Settings::from_config(&TomlConfig::from_file(path)?)?
        }
        None => Settings::default(),
    };
    settings.with_overrides(overrides)
}

async fn load_catalog(settings: &Settings) -> Result<Catalog> {
    match &settings.catalog_path {
        Some(path) => {
            let source = JsonFileSource::new(LocalStorage::current_dir(), path.clone());
            CatalogEngine::new(source).load().await
        }
        None => CatalogEngine::new(BuiltinSource).load().await,
    }
}

fn build_query(settings: &Settings, args: &QueryArgs) -> Result<monastery_catalog::CatalogQuery> {
    settings.query(&args.search, args.filter.as_deref(), args.sort.as_deref())
}

async fn run(cli: Cli) -> Result<()> {
    let overrides = cli.overrides();
    let settings = load_settings(&cli, &overrides)?;
    let prefs = settings.display;

    if let Commands::Languages = cli.command {
        for language in Language::ALL {
            let marker = if language == prefs.language { "*" } else { " " };
            println!(
                "{} {}  {:<10} {}",
                marker,
                language.code(),
                language.name(),
                language.native_name()
            );
        }
        return Ok(());
    }

    let catalog = load_catalog(&settings).await?;

    match &cli.command {
        Commands::List { query, .. } => {
            let query = build_query(&settings, query)?;
            let view = catalog.query(&query);
            print!("{}", render_list(&view, &prefs)?);
        }
        Commands::Show { id, .. } => {
            let record = catalog.require(id)?;
            println!("{}", render_detail(record, &prefs)?.trim_end());
        }
        Commands::Reviews {
            id, sort, stars, ..
        } => {
            let record = catalog.require(id)?;
            let summary = rating_summary(record);
            let sort = if settings.strict_keys {
                sort.parse()?
            } else {
                ReviewSort::parse_lenient(sort)
            };
            let reviews = select_reviews(&record.reviews, parse_star_filter(stars), sort);
            print!("{}", render_reviews(record, &summary, &reviews, &prefs)?);
        }
        Commands::Ask { question, .. } => {
            let guide = Guide::new(&catalog);
            let reply = guide
                .reply(&question.join(" "))
                .unwrap_or_else(|| guide.greeting());
            print!("{}", render_guide_reply(&reply, &prefs)?);
        }
        Commands::Export { output, query, .. } => {
            let query = build_query(&settings, query)?;
            let view = catalog.query(&query);
            let content = render_list(&view, &prefs)?;

            LocalStorage::current_dir()
                .write_file(output, content.as_bytes())
                .await?;
            tracing::info!("📁 Exported {} to {}", view.summary(), output);
            println!("✅ Exported {} to {}", view.summary(), output);
        }
        Commands::Validate => {
            println!(
                "✅ Catalog valid: {} monasteries, {} featured",
                catalog.len(),
                catalog.featured().len()
            );
        }
        Commands::Languages => {}
    }

    Ok(())
}
