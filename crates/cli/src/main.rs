//! ChemLearn CLI - drive the progress tracker against a local JSON store.

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::EnvFilter;

use chemlearn_core::{Course, CourseId, Module, ModuleId, ModuleKind, UserId};
use chemlearn_progress::{BasicProgressTracker, ProgressTracker, UpdateOutcome};
use chemlearn_store::{ContentStore, JsonStore};

#[derive(Parser)]
#[command(name = "chemlearn")]
#[command(about = "Chemistry course progress tracker", long_about = None)]
struct Cli {
    /// Store directory
    #[arg(long, default_value = ".chemlearn")]
    store: std::path::PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Seed a demo course
    Seed,
    /// List courses
    Courses,
    /// List a course's modules with lock state for a learner
    Modules {
        /// Course ID
        course: String,
        /// Learner ID
        #[arg(long)]
        user: String,
    },
    /// Show a learner's standing in a course
    Progress {
        /// Course ID
        course: String,
        /// Learner ID
        #[arg(long)]
        user: String,
    },
    /// Record progress on a module
    Update {
        /// Module ID
        module: String,
        /// Learner ID
        #[arg(long)]
        user: String,
        /// Progress, 0-100
        #[arg(long)]
        progress: u8,
        /// Quiz score
        #[arg(long)]
        score: Option<f32>,
    },
    /// Show where a learner should go next in a course
    Next {
        /// Course ID
        course: String,
        /// Learner ID
        #[arg(long)]
        user: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let cli = Cli::parse();
    let store = JsonStore::new(&cli.store).await?;

    match cli.command {
        Commands::Seed => {
            let course = Course {
                id: CourseId::new(),
                title: "General Chemistry I".to_string(),
                description: "Atoms, bonding, and stoichiometry".to_string(),
                created_at: chrono::Utc::now(),
            };
            store.save_course(&course).await?;

            let units: [(&str, ModuleKind, u32, u32); 4] = [
                ("Atomic Structure", ModuleKind::Theory, 25, 10),
                ("Flame Test Lab", ModuleKind::Lab, 45, 25),
                ("Chemical Bonding", ModuleKind::Theory, 30, 10),
                ("Unit Quiz", ModuleKind::Quiz, 20, 30),
            ];
            for (order_index, (title, kind, estimated_minutes, points)) in
                units.into_iter().enumerate()
            {
                let module = Module {
                    id: ModuleId::new(),
                    course_id: course.id,
                    order_index: order_index as u32,
                    kind,
                    title: title.to_string(),
                    estimated_minutes,
                    points,
                    created_at: chrono::Utc::now(),
                };
                store.save_module(&module).await?;
            }
            info!(course = %course.id, modules = units.len(), "seeded demo course");

            println!("Seeded course: {} - {}", course.id, course.title);
            println!("Demo learner: {}", UserId::new());
        }
        Commands::Courses => {
            let courses = store.list_courses().await?;
            println!("Courses ({})", courses.len());
            for course in courses {
                println!("  {} | {} - {}", course.id, course.title, course.description);
            }
        }
        Commands::Modules { course, user } => {
            let course_id = parse_course(&course)?;
            let user_id = parse_user(&user)?;
            let modules = store.list_course_modules(course_id).await?;
            let progress = progress_map(&store, user_id, course_id).await?;

            println!("Modules ({})", modules.len());
            for (position, module) in modules.iter().enumerate() {
                let locked = chemlearn_progress::is_locked(&modules, &progress, position);
                let state = match progress.get(&module.id) {
                    Some(r) if r.completed => "DONE",
                    Some(_) => "IN PROGRESS",
                    None if locked => "LOCKED",
                    None => "AVAILABLE",
                };
                println!(
                    "  {} | {:2} | {:6} | {:11} | {} ({} min, {} pts)",
                    module.id,
                    module.order_index,
                    module.kind.as_str(),
                    state,
                    module.title,
                    module.estimated_minutes,
                    module.points,
                );
            }
        }
        Commands::Progress { course, user } => {
            let course_id = parse_course(&course)?;
            let user_id = parse_user(&user)?;
            let tracker = BasicProgressTracker::new(store);
            let summary = tracker.course_summary(user_id, course_id).await?;

            println!("Course: {}", summary.course_id);
            println!(
                "  Completed: {}/{} ({}%)",
                summary.completed_modules, summary.total_modules, summary.percent_complete
            );
            println!("  Points earned: {}", summary.earned_points);
            if let Some(next) = summary.first_available {
                println!("  Next up: {}", next);
            }
        }
        Commands::Update {
            module,
            user,
            progress,
            score,
        } => {
            let module_id: ModuleId = module
                .parse()
                .map_err(|_| anyhow::anyhow!("Invalid module ID"))?;
            let user_id = parse_user(&user)?;
            let tracker = BasicProgressTracker::new(store);

            let outcome = tracker
                .update_progress(user_id, module_id, None, progress, score)
                .await?;
            match outcome {
                UpdateOutcome::Updated(record) => {
                    println!(
                        "Recorded: {}% {}",
                        record.progress,
                        if record.completed { "(completed)" } else { "" }
                    );
                }
                UpdateOutcome::Unchanged(_) => {
                    println!("No change: progress never moves backwards");
                }
            }
        }
        Commands::Next { course, user } => {
            let course_id = parse_course(&course)?;
            let user_id = parse_user(&user)?;
            let modules = store.list_course_modules(course_id).await?;
            let progress = progress_map(&store, user_id, course_id).await?;

            match chemlearn_progress::first_available_module(&modules, &progress) {
                Some(module_id) => println!("Next module: {}", module_id),
                None => println!("Course has no modules"),
            }
        }
    }

    Ok(())
}

fn parse_course(s: &str) -> Result<CourseId> {
    s.parse().map_err(|_| anyhow::anyhow!("Invalid course ID"))
}

fn parse_user(s: &str) -> Result<UserId> {
    s.parse().map_err(|_| anyhow::anyhow!("Invalid learner ID"))
}

async fn progress_map(
    store: &JsonStore,
    user_id: UserId,
    course_id: CourseId,
) -> Result<chemlearn_core::ProgressMap> {
    let records = store.list_user_progress(user_id, course_id).await?;
    Ok(records.into_iter().map(|r| (r.module_id, r)).collect())
}
