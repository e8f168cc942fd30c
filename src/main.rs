use std::sync::Arc;

use anyhow::Context;

use echodraft::classify::LlmClassifier;
use echodraft::config::Settings;
use echodraft::generate::{Generator, LlmGenerator, ScaffoldGenerator};
use echodraft::llm::OpenAiProvider;
use echodraft::pipeline::{DraftParams, Item, RouteOutcome, RoutingEngine};
use echodraft::store::{FileKvStore, ReviewQueue, StyleRuleStore};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_target(false)
        .init();

    let settings = Settings::from_env()?;
    let args: Vec<String> = std::env::args().skip(1).collect();

    match args.as_slice() {
        [flag, topic] if flag == "--draft" => draft_offline(&settings, topic).await,
        [path] => run_pipeline(&settings, path).await,
        _ => {
            eprintln!("usage: echodraft <item.json>");
            eprintln!("       echodraft --draft <topic>   (offline scaffold draft)");
            std::process::exit(2);
        }
    }
}

/// Triage one item from a JSON file and act on the decision.
async fn run_pipeline(settings: &Settings, path: &str) -> anyhow::Result<()> {
    let api_key = settings.api_key.clone().ok_or_else(|| {
        anyhow::anyhow!("OPENAI_API_KEY not set; triage needs a model (try --draft for offline drafting)")
    })?;

    let json = std::fs::read_to_string(path).with_context(|| format!("reading item {path}"))?;
    let item: Item = serde_json::from_str(&json).with_context(|| format!("parsing item {path}"))?;

    eprintln!("echodraft v{}", env!("CARGO_PKG_VERSION"));
    eprintln!("   Model: {}", settings.model);
    eprintln!("   Data dir: {}\n", settings.data_dir.display());

    let provider = Arc::new(OpenAiProvider::new(api_key, settings.model.clone()));
    let classifier = Arc::new(LlmClassifier::new(provider.clone()));
    let generator = Arc::new(LlmGenerator::new(provider));

    let kv = FileKvStore::open(settings.review_dir()).await?;
    let reviews = Arc::new(ReviewQueue::new(Arc::new(kv)));
    let rules = Arc::new(StyleRuleStore::new(settings.rules_path()));

    let engine = RoutingEngine::new(classifier, generator, reviews, rules);

    let mut params = DraftParams::new("");
    params.style = settings.style.clone();
    params.words = settings.words;
    params.explain = std::env::var("ECHODRAFT_EXPLAIN").is_ok_and(|v| v == "1");

    let result = engine.run(&item, params).await?;

    println!(
        "triage: {} (confidence {:.2}) {}",
        result.decision.label, result.decision.confidence, result.decision.reason
    );
    match result.outcome {
        RouteOutcome::End => println!("no further action"),
        RouteOutcome::Review { status, .. } => println!("{status}"),
        RouteOutcome::Drafted { draft, explanation } => {
            println!("\n{draft}");
            if let Some(explanation) = explanation {
                println!("\n[why] {explanation}");
            }
        }
    }
    Ok(())
}

/// Offline draft using the deterministic scaffold generator, still honoring
/// persisted style rules.
async fn draft_offline(settings: &Settings, topic: &str) -> anyhow::Result<()> {
    let rules = StyleRuleStore::new(settings.rules_path());
    let personalization = rules.load().await.render();

    let mut params = DraftParams::new(topic);
    params.style = settings.style.clone();
    params.words = settings.words;

    let draft = ScaffoldGenerator.draft(&params, &personalization).await?;
    println!("{draft}");
    Ok(())
}
