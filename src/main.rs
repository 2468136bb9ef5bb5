use std::io::Write;
use std::sync::Arc;

use anyhow::Result;
use clap::{Parser, Subcommand};
use mindforge::catalog::{chapters_for, ExamLevel, Subject, TUTORS};
use mindforge::gemini::GenerationGateway;
use mindforge::persist::SupabaseGateway;
use mindforge::store::PreferenceUpdate;
use mindforge::{App, Config};
use tokio::io::AsyncBufReadExt;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "mindforge")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start an interactive tutoring session
    Chat {
        /// Tutor persona id (see `mindforge tutors`)
        #[arg(short, long, default_value = "einstein")]
        tutor: String,
        /// Exam level
        #[arg(long, default_value = "jee-main")]
        level: ExamLevel,
        /// Subject focus
        #[arg(long, default_value = "physics")]
        subject: Subject,
        /// Chapter to study (defaults to the subject's first chapter)
        #[arg(long)]
        chapter: Option<String>,
        /// Sign in with this email to persist the session remotely
        #[arg(long, requires = "password")]
        email: Option<String>,
        /// Password for --email
        #[arg(long)]
        password: Option<String>,
    },
    /// Print the mind map for a topic as JSON
    Mindmap {
        /// Topic name (e.g. "Kinematics")
        topic: String,
        /// Subtopics to seed branches for unknown topics
        #[arg(long)]
        subtopics: Vec<String>,
    },
    /// Print short notes for a topic as JSON
    Notes {
        /// Topic name
        topic: String,
        /// Subtopics to seed sections for unknown topics
        #[arg(long)]
        subtopics: Vec<String>,
    },
    /// List tutor personas
    Tutors,
    /// List syllabus chapters for a level and subject
    Syllabus {
        #[arg(long, default_value = "jee-main")]
        level: ExamLevel,
        #[arg(long, default_value = "physics")]
        subject: Subject,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "mindforge=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .init();

    let cli = Cli::parse();
    let config = Config::load()?;

    match cli.command {
        Commands::Chat { tutor, level, subject, chapter, email, password } => {
            run_chat(config, &tutor, level, subject, chapter, email, password).await
        }
        Commands::Mindmap { topic, subtopics } => {
            let gateway = GenerationGateway::new(config.gemini_credential());
            let generated = gateway.generate_mind_map(&topic, &subtopics).await;
            println!("{}", serde_json::to_string_pretty(&generated.value)?);
            Ok(())
        }
        Commands::Notes { topic, subtopics } => {
            let gateway = GenerationGateway::new(config.gemini_credential());
            let generated = gateway.generate_short_notes(&topic, &subtopics).await;
            println!("{}", serde_json::to_string_pretty(&generated.value)?);
            Ok(())
        }
        Commands::Tutors => {
            for tutor in TUTORS {
                println!(
                    "{}  {:<12} {} ({}) - \"{}\"",
                    tutor.avatar,
                    tutor.id,
                    tutor.name,
                    tutor.subject.display_name(),
                    tutor.tagline
                );
            }
            Ok(())
        }
        Commands::Syllabus { level, subject } => {
            let chapters = chapters_for(level, subject);
            if chapters.is_empty() {
                println!("No chapters for {} at {}", subject.display_name(), level.id());
                return Ok(());
            }
            for chapter in chapters {
                println!("{}", chapter.chapter_name);
                for sub in &chapter.subtopics {
                    println!("  - {sub}");
                }
            }
            Ok(())
        }
    }
}

#[allow(clippy::too_many_arguments)]
async fn run_chat(
    mut config: Config,
    tutor_id: &str,
    level: ExamLevel,
    subject: Subject,
    chapter: Option<String>,
    email: Option<String>,
    password: Option<String>,
) -> Result<()> {
    let signing_in = email.is_some();
    if !signing_in && !config.demo_mode {
        println!("No --email given: running in demo mode, nothing is persisted remotely.\n");
        config.demo_mode = true;
    }

    let supabase = Arc::new(SupabaseGateway::new(
        config.supabase_url.clone(),
        config.supabase_anon_key.clone(),
    ));
    let mut app = App::new(config, supabase.clone());

    if let (Some(email), Some(password)) = (email, password) {
        // Sign-in failure is the one error shown directly to the user
        match supabase.sign_in_with_password(&email, &password).await {
            Ok(session) => {
                println!("Signed in as {email}.\n");
                app.handle_sign_in(session).await;
            }
            Err(err) => {
                eprintln!("{err}");
                return Ok(());
            }
        }
    }

    let Some(tutor) = app.select_tutor(tutor_id) else {
        eprintln!("Unknown tutor '{tutor_id}'. See `mindforge tutors`.");
        return Ok(());
    };

    app.update_preferences(PreferenceUpdate {
        level: Some(level),
        subject: Some(subject),
        ..Default::default()
    });

    let chapters = chapters_for(level, subject);
    let selected = match &chapter {
        Some(name) => chapters.iter().find(|c| c.chapter_name.eq_ignore_ascii_case(name)),
        None => chapters.first(),
    };
    match selected {
        Some(chapter) => {
            app.toggle_chapter(chapter);
            println!("Chapter: {}", chapter.chapter_name);
        }
        None => {
            eprintln!("Unknown chapter. See `mindforge syllabus --subject {}`.", subject.display_name().to_lowercase());
            return Ok(());
        }
    }

    app.restore_transcript().await;

    println!(
        "{} {} is ready. Type a question, or :mindmap, :explain <your explanation>, :progress, :reset, :quit.\n",
        tutor.avatar, tutor.name
    );

    let mut lines = tokio::io::BufReader::new(tokio::io::stdin()).lines();
    prompt()?;
    while let Some(line) = lines.next_line().await? {
        let line = line.trim();
        match line {
            "" => {}
            ":quit" | ":q" => break,
            ":reset" => {
                app.reset_session();
                println!("Session reset.");
            }
            ":progress" => println!("Progress: {}%", app.session().progress()),
            ":mindmap" => match app.request_mind_map().await {
                Ok(generated) => println!("{}", serde_json::to_string_pretty(&generated.value)?),
                Err(err) => println!("{err}"),
            },
            explanation if explanation.starts_with(":explain ") => {
                let explanation = explanation.trim_start_matches(":explain ").trim();
                let topic = app.session().current_topic().unwrap_or_else(|| "this chapter".into());
                let review = app.generation().evaluate_mastery(explanation, &topic, tutor).await;
                println!("\nScore: {}/100\n{}\n", review.value.score, review.value.feedback);
            }
            message => match app.send_message(message).await {
                Ok(reply) => println!("\n{} {}:\n{}\n", tutor.avatar, tutor.name, reply.value),
                Err(err) => println!("{err}"),
            },
        }
        prompt()?;
    }

    if app.identity().is_some() {
        supabase.sign_out().await;
        app.sign_out();
    }

    Ok(())
}

fn prompt() -> Result<()> {
    print!("you> ");
    std::io::stdout().flush()?;
    Ok(())
}
