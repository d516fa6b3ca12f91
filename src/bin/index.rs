use std::process::ExitCode;

use clap::Parser;
use pozo_rag::{
    config::Settings,
    document::splitter::ChunkSplitter,
    embedding::{ollama::OllamaEmbedder, Embedder},
    pipeline,
    selector::{EntitySelector, FixedSelector, PromptSelector},
    store::JsonVectorStore,
    table, Result,
};
use tracing_subscriber::EnvFilter;

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let settings = Settings::parse();

    match run(settings).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            match err.user_message() {
                Some(message) => println!("{message}"),
                None => {
                    tracing::error!("{err}");
                    eprintln!("Error: {err}");
                }
            }
            ExitCode::FAILURE
        }
    }
}

async fn run(settings: Settings) -> Result<()> {
    let splitter = ChunkSplitter::new(settings.chunk_size, settings.chunk_overlap)?;

    let table = table::load_table(&settings.excel_path, settings.sheet.as_deref())?;
    let wells = table.entities(&settings.entity_column)?;

    tracing::info!("Found {} wells", wells.len());

    let well = match &settings.seleccion {
        Some(answer) => FixedSelector::new(answer.as_str()).select(&wells)?,
        None => PromptSelector::stdin().select(&wells)?,
    };
    println!("Pozo seleccionado: {well}");

    let documents = pipeline::documents_for_entity(&table, &settings.entity_column, well)?;
    println!("Documentos generados: {}", documents.len());

    let embedder = OllamaEmbedder::new(settings.ollama_host.as_str(), settings.model.as_str());
    let mut store = JsonVectorStore::open(&settings.db_dir, embedder.model())?;

    let report = pipeline::index_documents(
        &documents,
        &splitter,
        &embedder,
        &mut store,
        settings.batch_size,
    )
    .await?;

    tracing::info!(
        "Indexed {} chunks from {} documents into {}",
        report.chunks,
        report.documents,
        store.dir().display()
    );

    println!("Indexación completada. Puedes proceder a la consulta en la siguiente parte.");

    Ok(())
}
