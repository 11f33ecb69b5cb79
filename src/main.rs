use std::fs::File;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use clap::Parser;
use pdf_tutor::{GradingPolicy, Quiz, QuizConfig, DEFAULT_TIME_LIMIT_SECS};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(version, about = "Timed study quizzes in the terminal", long_about = None)]
struct Args {
    /// JSON deck to load the questions from (defaults to the built-in sample deck)
    #[arg(short, long, env = "PDF_TUTOR_QUESTIONS")]
    questions: Option<PathBuf>,

    /// Time limit per quiz, in seconds
    #[arg(short, long, env = "PDF_TUTOR_TIME_LIMIT", default_value_t = DEFAULT_TIME_LIMIT_SECS)]
    time_limit: u32,

    /// How fill-in answers are graded: exact or lenient
    #[arg(short, long, env = "PDF_TUTOR_GRADING", default_value = "exact")]
    grading: GradingPolicy,

    /// Write logs to this file (the terminal is taken over by the quiz)
    #[arg(long, env = "PDF_TUTOR_LOG")]
    log_file: Option<PathBuf>,
}

impl Args {
    fn config(&self) -> QuizConfig {
        QuizConfig {
            questions: self.questions.clone(),
            time_limit_secs: self.time_limit,
            grading: self.grading,
        }
    }
}

fn init_logging(path: &Path) -> std::io::Result<()> {
    let file = File::create(path)?;
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("pdf_tutor=info")),
        )
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .init();
    Ok(())
}

#[tokio::main]
async fn main() {
    let args = Args::parse();

    if let Some(path) = &args.log_file {
        if let Err(e) = init_logging(path) {
            eprintln!("Failed to open log file {}: {}", path.display(), e);
            std::process::exit(1);
        }
    }

    let quiz = match Quiz::new(args.config()) {
        Ok(quiz) => quiz,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };

    if let Err(e) = quiz.run().await {
        eprintln!("Error running quiz: {}", e);
        std::process::exit(1);
    }
}
