use std::{
    path::PathBuf,
    time::{Duration, Instant},
};

use anyhow::{Result, bail};
use clap::{Args, Parser, Subcommand, ValueEnum};
use console::{Term, style};
use indicatif::{ProgressBar, ProgressStyle};

use quizgen_core::{
    Provider, QuizPipeline, QuizSession, QuizgenConfig,
    format::{option_label, parse_option_label},
    format_quiz_readable, get_cache_dir, get_quiz_path, is_supported_video_url, load_quiz,
    save_quiz,
};

mod logging;

fn format_duration(d: Duration) -> String {
    let secs = d.as_secs_f64();
    if secs < 60.0 {
        format!("{:.1}s", secs)
    } else {
        format!("{:.0}m {:.0}s", (secs / 60.0).floor(), secs % 60.0)
    }
}

/// CLI wrapper for Provider enum (needed for clap ValueEnum)
#[derive(Clone, Copy, ValueEnum)]
enum CliProvider {
    Gemini,
    Grok,
    Openai,
}

impl From<CliProvider> for Provider {
    fn from(cli: CliProvider) -> Self {
        match cli {
            CliProvider::Gemini => Provider::Gemini,
            CliProvider::Grok => Provider::Grok,
            CliProvider::Openai => Provider::Openai,
        }
    }
}

#[derive(Parser)]
#[command(name = "quizgen")]
#[command(about = "Download YouTube videos, transcribe with Whisper, and generate multiple-choice quizzes")]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Log pipeline details to stderr
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Command {
    /// Generate a quiz from a video URL
    Generate(GenerateArgs),
    /// Take a saved quiz in the terminal
    Play {
        /// Quiz JSON file written by `generate`
        path: PathBuf,
    },
}

#[derive(Args)]
struct GenerateArgs {
    /// Video URL
    url: String,

    /// Speech recognition language (e.g., "de", "en")
    #[arg(short, long)]
    lang: Option<String>,

    /// AI provider for question generation
    #[arg(short, long)]
    provider: Option<CliProvider>,

    /// API key for the provider (defaults to the provider's env var)
    #[arg(long)]
    api_key: Option<String>,

    /// Whisper model file name (e.g., "ggml-base.bin")
    #[arg(short, long)]
    model: Option<String>,

    /// Run whisper on the GPU
    #[arg(long)]
    gpu: bool,

    /// Write the quiz here instead of the cache directory
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Force re-processing even if a cached quiz exists
    #[arg(short, long)]
    force: bool,
}

fn create_spinner(msg: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .tick_chars("⠁⠂⠄⡀⢀⠠⠐⠈ ")
            .template("{spinner:.cyan} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    pb.set_message(msg.to_string());
    pb.enable_steady_tick(Duration::from_millis(80));
    pb
}

extern "C" fn whisper_log_callback(
    _level: u32,
    _message: *const std::ffi::c_char,
    _user_data: *mut std::ffi::c_void,
) {
    // silent
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init_tracing(cli.verbose);

    match cli.command {
        Command::Generate(args) => generate(args, cli.verbose).await,
        Command::Play { path } => play(path).await,
    }
}

async fn generate(args: GenerateArgs, verbose: bool) -> Result<()> {
    if !is_supported_video_url(&args.url) {
        eprintln!(
            "{} {} is not a YouTube URL",
            style("Error:").red().bold(),
            args.url
        );
        std::process::exit(1);
    }

    if !verbose {
        unsafe {
            whisper_rs::set_log_callback(Some(whisper_log_callback), std::ptr::null_mut());
        }
    }

    let mut config = QuizgenConfig::default();
    if let Some(lang) = args.lang {
        config.language = lang;
    }
    if let Some(provider) = args.provider {
        config.provider = provider.into();
    }
    if let Some(model) = args.model {
        config.whisper_model = model;
    }
    config.api_key = args.api_key;
    config.use_gpu = config.use_gpu || args.gpu;

    tracing::debug!(
        language = %config.language,
        model = %config.whisper_model,
        provider = config.provider.name(),
        cache = %config.cache_root.display(),
        "configuration resolved"
    );

    let quiz_path = args
        .output
        .unwrap_or_else(|| get_quiz_path(&get_cache_dir(&config.cache_root, &args.url)));

    println!(
        "\n{}  {}\n",
        style("quizgen").cyan().bold(),
        style("Video Quiz Generator").dim()
    );

    if !args.force && quiz_path.exists() {
        let quiz = load_quiz(&quiz_path).await?;
        println!(
            "{} Quiz generated {}",
            style("✓").green().bold(),
            style("(cached)").dim()
        );
        print_quiz(&quiz, &quiz_path);
        return Ok(());
    }

    let pipeline = QuizPipeline::from_config(&config);
    if pipeline.generator().uses_llm() {
        println!(
            "{} Questions by {}",
            style("✓").green().bold(),
            config.provider.name()
        );
    } else {
        println!(
            "{} No {} key found, questions will be derived from the transcript",
            style("!").yellow().bold(),
            config.provider.name()
        );
    }
    println!("{}", style("─".repeat(60)).dim());

    let total_start = Instant::now();
    let spinner = create_spinner("Downloading, transcribing and writing questions...");
    let quiz = match pipeline.run(&args.url).await {
        Ok(quiz) => quiz,
        Err(e) => {
            spinner.finish_and_clear();
            eprintln!("{} {}", style("Error:").red().bold(), e);
            std::process::exit(1);
        }
    };
    save_quiz(&quiz, &quiz_path).await?;
    spinner.finish_with_message(format!(
        "{} Quiz generated: {} questions {}",
        style("✓").green().bold(),
        quiz.questions.len(),
        style(format!("[{}]", format_duration(total_start.elapsed()))).dim()
    ));

    print_quiz(&quiz, &quiz_path);
    Ok(())
}

fn print_quiz(quiz: &quizgen_core::QuizDraft, path: &std::path::Path) {
    println!("\n{} {}\n", style("Saved:").dim(), style(path.display()).cyan());
    println!("{}", style("─".repeat(60)).dim());
    println!("{}", format_quiz_readable(quiz));
}

async fn play(path: PathBuf) -> Result<()> {
    let quiz = load_quiz(&path).await?;
    if quiz.questions.is_empty() {
        bail!("{} contains no questions", path.display());
    }

    let term = Term::stdout();
    let mut session = QuizSession::new(quiz);

    println!(
        "\n{}  {}\n",
        style(&session.quiz().title).cyan().bold(),
        style(&session.quiz().description).dim()
    );

    while !session.is_completed() {
        let index = session.current_question_index();
        let question = session.quiz().questions[index].clone();

        println!(
            "{} {}",
            style(format!("{}/{}", index + 1, session.total_questions())).dim(),
            style(&question.question_title).bold()
        );
        for (i, option) in question.question_options.iter().enumerate() {
            let label = option_label(i).unwrap_or('?');
            println!("  {}) {}", label, option);
        }

        let choice = loop {
            term.write_str("> ")?;
            let line = term.read_line()?;
            match parse_option_label(&line).and_then(|i| question.question_options.get(i)) {
                Some(option) => break option.clone(),
                None => println!("{}", style("Pick A, B, C or D").yellow()),
            }
        };

        session.submit_answer(index, &choice)?;
        if choice == question.answer {
            println!("{}\n", style("✓ Correct").green().bold());
        } else {
            println!(
                "{} {}\n",
                style("✗ Wrong, correct was:").red().bold(),
                question.answer
            );
        }
        session.advance();
    }

    println!(
        "{} {}/{}",
        style("Score:").dim(),
        style(session.score()).cyan().bold(),
        session.total_questions()
    );

    Ok(())
}
