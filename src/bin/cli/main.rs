mod config;

use std::path::PathBuf;

use anyhow::{bail, Context};
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use serde::Serialize;

use studium::chat_sessions::MessageRole;
use studium::flashcards::ReviewRating;
use studium::profile::PersonalityMode;
use studium::storage::{EntityId, SnapshotStore, StudentId};
use studium::{StudySession, StudyStore};

use config::CliConfig;

#[derive(Parser)]
#[command(name = "studium-cli", about = "Studium study-data store CLI", version)]
struct Cli {
    /// Student identity to act as (default: config file, then "local")
    #[arg(long, global = true)]
    student: Option<String>,

    /// Snapshot directory (default: config file, then platform data dir)
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// Output format
    #[arg(long, global = true, default_value = "plain")]
    format: OutputFormat,

    #[command(subcommand)]
    command: Command,
}

#[derive(Clone, Debug, clap::ValueEnum)]
enum OutputFormat {
    Plain,
    Json,
}

#[derive(Subcommand)]
enum Command {
    /// Profile management
    #[command(subcommand)]
    Profile(ProfileCommand),

    /// Chat session transcripts
    #[command(subcommand)]
    Chat(ChatCommand),

    /// Study notes
    #[command(subcommand)]
    Note(NoteCommand),

    /// Flashcard decks and reviews
    #[command(subcommand)]
    Deck(DeckCommand),

    /// Quiz result history
    #[command(subcommand)]
    Quiz(QuizCommand),

    /// Study goals
    #[command(subcommand)]
    Goal(GoalCommand),

    /// Per-subject mastery stats
    #[command(subcommand)]
    Progress(ProgressCommand),

    /// Study streak
    #[command(subcommand)]
    Streak(StreakCommand),
}

#[derive(Subcommand)]
enum ProfileCommand {
    /// Show the profile
    Show,
    /// Create or update the profile
    Set {
        display_name: String,
        /// strict_teacher, friendly, or pro_coder
        #[arg(long, default_value = "friendly")]
        mode: String,
        #[arg(long, default_value = "en")]
        language: String,
    },
}

#[derive(Subcommand)]
enum ChatCommand {
    /// List sessions, most recent first
    List,
    /// Create a session
    New { title: String },
    /// Show one session's messages
    Show { session: String },
    /// Append a message to a session
    Say {
        session: String,
        /// user or assistant
        #[arg(long, default_value = "user")]
        role: String,
        content: String,
    },
    /// Delete a session
    Rm { session: String },
}

#[derive(Subcommand)]
enum NoteCommand {
    /// List notes
    List,
    /// Create a note
    Add {
        title: String,
        #[arg(long, default_value = "")]
        topic: String,
        #[arg(long, default_value = "")]
        content: String,
    },
    /// Show one note
    Show { id: String },
    /// Replace a note's fields
    Edit {
        id: String,
        title: String,
        #[arg(long, default_value = "")]
        topic: String,
        #[arg(long, default_value = "")]
        content: String,
    },
    /// Delete a note
    Rm { id: String },
}

#[derive(Subcommand)]
enum DeckCommand {
    /// List decks
    List,
    /// Create a deck
    New { name: String, subject: String },
    /// List the cards of a deck
    Cards { deck: String },
    /// Add a card to a deck
    AddCard {
        deck: String,
        front: String,
        back: String,
    },
    /// Rate a card: again, hard, good, or easy
    Review {
        deck: String,
        card: String,
        rating: String,
    },
}

#[derive(Subcommand)]
enum QuizCommand {
    /// List results, most recent first
    List,
    /// Record a quiz result
    Record {
        subject: String,
        score: u32,
        total: u32,
    },
}

#[derive(Subcommand)]
enum GoalCommand {
    /// List goals
    List,
    /// Create a goal (target date as YYYY-MM-DD)
    Add {
        title: String,
        target_date: String,
        #[arg(long, default_value = "")]
        description: String,
    },
    /// Mark a goal completed
    Done { id: String },
}

#[derive(Subcommand)]
enum ProgressCommand {
    /// List mastery stats
    List,
    /// Set mastery for a subject
    Set { subject: String, percent: f32 },
}

#[derive(Subcommand)]
enum StreakCommand {
    /// Show the current streak
    Show,
    /// Record a study activity now
    Touch,
}

fn parse_mode(s: &str) -> anyhow::Result<PersonalityMode> {
    match s {
        "strict_teacher" => Ok(PersonalityMode::StrictTeacher),
        "friendly" => Ok(PersonalityMode::Friendly),
        "pro_coder" => Ok(PersonalityMode::ProCoder),
        other => bail!("unknown personality mode {:?}", other),
    }
}

fn parse_role(s: &str) -> anyhow::Result<MessageRole> {
    match s {
        "user" => Ok(MessageRole::User),
        "assistant" => Ok(MessageRole::Assistant),
        other => bail!("unknown role {:?} (expected user or assistant)", other),
    }
}

fn parse_date(s: &str) -> anyhow::Result<NaiveDate> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .with_context(|| format!("invalid date {:?} (expected YYYY-MM-DD)", s))
}

fn emit<T: Serialize>(format: &OutputFormat, value: &T, plain: impl FnOnce(&T)) {
    match format {
        OutputFormat::Json => match serde_json::to_string_pretty(value) {
            Ok(json) => println!("{}", json),
            Err(err) => eprintln!("serialization error: {}", err),
        },
        OutputFormat::Plain => plain(value),
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    let config = CliConfig::load();

    let data_dir = cli
        .data_dir
        .clone()
        .or(config.data_dir)
        .map_or_else(SnapshotStore::default_dir, Ok)?;
    let snapshots = SnapshotStore::new(data_dir)?;

    let store = StudyStore::new();
    for (student, data) in snapshots.load_all()? {
        store.restore_student(student, data);
    }

    let student = cli
        .student
        .clone()
        .or(config.student)
        .unwrap_or_else(|| "local".to_string());
    let session = store.session(StudentId::new(student));

    run(&cli, &session)?;

    snapshots.save_all(store.students())?;
    Ok(())
}

fn run(cli: &Cli, session: &StudySession) -> anyhow::Result<()> {
    let format = &cli.format;

    match &cli.command {
        Command::Profile(ProfileCommand::Show) => {
            let profile = session.get_profile()?;
            emit(format, &profile, |p| {
                println!("{} [{:?}] lang={}", p.display_name, p.personality_mode, p.preferred_language);
            });
        }
        Command::Profile(ProfileCommand::Set {
            display_name,
            mode,
            language,
        }) => {
            let mode = parse_mode(mode)?;
            let profile = match session.update_profile(
                display_name.clone(),
                mode,
                language.clone(),
            ) {
                Err(studium::StoreError::ProfileNotFound) => {
                    session.create_profile(display_name.clone(), mode, language.clone())?
                }
                other => other?,
            };
            emit(format, &profile, |p| {
                println!("profile saved for {}", p.display_name);
            });
        }

        Command::Chat(ChatCommand::List) => {
            let sessions = session.get_chat_sessions();
            emit(format, &sessions, |list| {
                for s in list {
                    println!("{}  {}  ({} messages)", s.id, s.title, s.message_count);
                }
            });
        }
        Command::Chat(ChatCommand::New { title }) => {
            let id = session.create_chat_session(title.clone());
            println!("{}", id);
        }
        Command::Chat(ChatCommand::Show { session: id }) => {
            let messages = session.get_chat_messages(&EntityId::from(id.as_str()))?;
            emit(format, &messages, |list| {
                for m in list {
                    println!("[{:?}] {}", m.role, m.content);
                }
            });
        }
        Command::Chat(ChatCommand::Say {
            session: id,
            role,
            content,
        }) => {
            let role = parse_role(role)?;
            session.add_message(&EntityId::from(id.as_str()), role, content.clone())?;
        }
        Command::Chat(ChatCommand::Rm { session: id }) => {
            session.delete_chat_session(&EntityId::from(id.as_str()));
        }

        Command::Note(NoteCommand::List) => {
            let notes = session.get_notes();
            emit(format, &notes, |list| {
                for n in list {
                    println!("{}  [{}] {}", n.id, n.topic, n.title);
                }
            });
        }
        Command::Note(NoteCommand::Add {
            title,
            topic,
            content,
        }) => {
            let note = session.create_note(title.clone(), content.clone(), topic.clone());
            println!("{}", note.id);
        }
        Command::Note(NoteCommand::Show { id }) => {
            let note = session.get_note(&EntityId::from(id.as_str()))?;
            emit(format, &note, |n| {
                println!("# {} [{}]\n{}", n.title, n.topic, n.content);
            });
        }
        Command::Note(NoteCommand::Edit {
            id,
            title,
            topic,
            content,
        }) => {
            session.update_note(
                &EntityId::from(id.as_str()),
                title.clone(),
                content.clone(),
                topic.clone(),
            );
        }
        Command::Note(NoteCommand::Rm { id }) => {
            session.delete_note(&EntityId::from(id.as_str()));
        }

        Command::Deck(DeckCommand::List) => {
            let decks = session.get_decks();
            emit(format, &decks, |list| {
                for d in list {
                    println!("{}  {} ({}, {} cards)", d.id, d.name, d.subject, d.cards.len());
                }
            });
        }
        Command::Deck(DeckCommand::New { name, subject }) => {
            let deck = session.create_deck(name.clone(), subject.clone());
            println!("{}", deck.id);
        }
        Command::Deck(DeckCommand::Cards { deck }) => {
            let cards = session.get_deck_cards(&EntityId::from(deck.as_str()))?;
            emit(format, &cards, |list| {
                for c in list {
                    println!(
                        "{}  {} -> {}  (interval {}d, ease {:.2}, due {})",
                        c.id, c.front, c.back, c.interval_days, c.ease_factor, c.next_review
                    );
                }
            });
        }
        Command::Deck(DeckCommand::AddCard { deck, front, back }) => {
            let card = session.add_card(
                &EntityId::from(deck.as_str()),
                front.clone(),
                back.clone(),
            )?;
            println!("{}", card.id);
        }
        Command::Deck(DeckCommand::Review { deck, card, rating }) => {
            let rating: ReviewRating = rating.parse().map_err(anyhow::Error::msg)?;
            let reviewed = session.submit_review(
                &EntityId::from(deck.as_str()),
                &EntityId::from(card.as_str()),
                rating,
            )?;
            match reviewed {
                Some(card) => emit(format, &card, |c| {
                    println!("next review in {}d (ease {:.2})", c.interval_days, c.ease_factor);
                }),
                None => println!("no such card in deck"),
            }
        }

        Command::Quiz(QuizCommand::List) => {
            let results = session.get_quiz_results();
            emit(format, &results, |list| {
                for r in list {
                    println!("{}  {}  {}/{}", r.timestamp, r.subject, r.score, r.total_questions);
                }
            });
        }
        Command::Quiz(QuizCommand::Record {
            subject,
            score,
            total,
        }) => {
            let id = session.record_quiz_result(subject.clone(), *score, *total);
            println!("{}", id);
        }

        Command::Goal(GoalCommand::List) => {
            let goals = session.get_goals();
            emit(format, &goals, |list| {
                for g in list {
                    let mark = if g.is_completed { "x" } else { " " };
                    println!("[{}] {}  {} (by {})", mark, g.id, g.title, g.target_date);
                }
            });
        }
        Command::Goal(GoalCommand::Add {
            title,
            target_date,
            description,
        }) => {
            let target = parse_date(target_date)?;
            let goal = session.create_goal(title.clone(), description.clone(), target);
            println!("{}", goal.id);
        }
        Command::Goal(GoalCommand::Done { id }) => {
            session.complete_goal(&EntityId::from(id.as_str()))?;
        }

        Command::Progress(ProgressCommand::List) => {
            let stats = session.get_progress_stats();
            emit(format, &stats, |list| {
                for s in list {
                    println!("{}  {:.1}%  (updated {})", s.subject, s.mastery_percent, s.last_updated);
                }
            });
        }
        Command::Progress(ProgressCommand::Set { subject, percent }) => {
            session.update_progress_stat(subject.clone(), *percent);
        }

        Command::Streak(StreakCommand::Show) => {
            let streak = session.get_study_streak();
            emit(format, &streak, |s| {
                println!("{} day(s), last activity {}", s.current_streak, s.last_study_date);
            });
        }
        Command::Streak(StreakCommand::Touch) => {
            let streak = session.record_study_activity();
            emit(format, &streak, |s| {
                println!("streak is now {} day(s)", s.current_streak);
            });
        }
    }

    Ok(())
}
