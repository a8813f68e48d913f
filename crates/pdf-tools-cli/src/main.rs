use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use pdf_compose::{ExportJob, PageDescriptor, SourceDocuments, SourceKind, codec};
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Parser)]
#[command(name = "pdft", about = "PDF tools CLI", version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Concatenate whole PDFs in the given order
    Merge {
        /// Input PDF files, in output order
        #[arg(short, long, required = true, num_args = 1..)]
        input: Vec<PathBuf>,

        /// Output PDF file
        #[arg(short, long)]
        output: PathBuf,
    },

    /// Write a PDF with its pages in reverse order
    Reverse {
        /// Input PDF file
        #[arg(short, long)]
        input: PathBuf,

        /// Output PDF file
        #[arg(short, long)]
        output: PathBuf,
    },

    /// Build a PDF page by page from PDFs and images
    Compose {
        /// Page source: `file.pdf` (all pages), `file.pdf:N` (1-based page N) or an image
        #[arg(short, long = "page", required = true, value_parser = parse_page_arg)]
        page: Vec<PageArg>,

        /// Output PDF file
        #[arg(short, long)]
        output: PathBuf,

        /// Resolution used to size image pages
        #[arg(long, default_value = "72")]
        dpi: f32,
    },
}

/// One `-p` argument
#[derive(Debug, Clone, PartialEq)]
struct PageArg {
    path: PathBuf,
    /// Zero-based page, or every page when absent
    page_index: Option<usize>,
}

fn parse_page_arg(arg: &str) -> std::result::Result<PageArg, String> {
    if let Some((path, number)) = arg.rsplit_once(':') {
        // Only a trailing number counts, so `C:\doc.pdf` stays a path
        if let Ok(number) = number.parse::<usize>() {
            if number == 0 {
                return Err("page numbers start at 1".to_string());
            }
            if path.is_empty() {
                return Err(format!("missing file before page number in '{}'", arg));
            }
            return Ok(PageArg {
                path: PathBuf::from(path),
                page_index: Some(number - 1),
            });
        }
    }
    Ok(PageArg {
        path: PathBuf::from(arg),
        page_index: None,
    })
}

/// Turn page arguments into descriptors, opening each PDF once
fn build_job(args: &[PageArg]) -> Result<ExportJob> {
    let mut pages = Vec::new();
    let mut sources = SourceDocuments::new();

    for arg in args {
        let kind = SourceKind::from_path(&arg.path)
            .with_context(|| format!("Unsupported file type: {}", arg.path.display()))?;

        match (kind, arg.page_index) {
            (SourceKind::Image, None) => pages.push(PageDescriptor::image(&arg.path)),
            (SourceKind::Image, Some(_)) => {
                bail!("Images have a single page: {}", arg.path.display())
            }
            (SourceKind::Pdf, page_index) => {
                if !sources.contains_key(&arg.path) {
                    let doc = codec::open_document(&arg.path)?;
                    sources.insert(arg.path.clone(), Arc::new(doc));
                }
                match page_index {
                    Some(index) => pages.push(PageDescriptor::pdf_page(&arg.path, index)),
                    None => {
                        let count = sources
                            .get(&arg.path)
                            .map(|doc| codec::page_count(doc))
                            .unwrap_or_default();
                        pages.extend(
                            (0..count).map(|index| PageDescriptor::pdf_page(&arg.path, index)),
                        );
                    }
                }
            }
        }
    }

    Ok(ExportJob { pages, sources })
}

fn report_progress(progress: pdf_compose::Progress) {
    log::debug!(
        "[{}/{}] {}",
        progress.current,
        progress.total,
        progress.operation
    );
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Merge { input, output } => {
            let page_count =
                pdf_compose::merge_files(input.clone(), output.clone(), report_progress).await?;
            println!(
                "Merged {} files ({} pages) → {}",
                input.len(),
                page_count,
                output.display()
            );
        }

        Commands::Reverse { input, output } => {
            let page_count = pdf_compose::reverse_file(input, output.clone()).await?;
            println!("Reversed {} pages → {}", page_count, output.display());
        }

        Commands::Compose { page, output, dpi } => {
            let job = build_job(&page)?;
            let report =
                pdf_compose::export_sequence(job, output.clone(), dpi, report_progress).await?;
            println!("Composed {} pages → {}", report.page_count, output.display());
        }
    }

    Ok(())
}
