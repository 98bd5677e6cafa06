use std::sync::Arc;

use catalog_sync::api::{CourseApi, HttpCourseApi};
use catalog_sync::config::ApiConfig;
use catalog_sync::form::to_draft;
use catalog_sync::models::{CourseId, Difficulty};
use catalog_sync::services;
use catalog_sync::state::AppState;
use catalog_sync::sync::{FetchOutcome, Filter, ViewState};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

const HELP: &str = "commands: search <text> | category <name> | difficulty <level|any> | page <n> \
| refresh | admin | catalog | categories | home | dashboard | enrollments | show <id> | delete <id> | quit";

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "catalog_sync=debug".to_string()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = ApiConfig::new_from_env()?;
    info!("using backend at {}", config.base_url);
    let api = Arc::new(HttpCourseApi::new(config.clone())?);
    let state = AppState::new(api, config);

    let mut controller = state.catalog_controller();
    report(&controller.refresh().await, &controller.snapshot());
    println!("{}", HELP);

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        let line = line.trim();
        let (command, arg) = line.split_once(' ').unwrap_or((line, ""));
        let arg = arg.trim();

        match command {
            "" => continue,
            "quit" | "exit" => break,
            "search" => {
                let outcome = controller.set_filter(Filter::Search(arg.to_string())).await;
                report(&outcome, &controller.snapshot());
            }
            "category" => {
                let outcome = controller.set_filter(Filter::Category(arg.to_string())).await;
                report(&outcome, &controller.snapshot());
            }
            "difficulty" => {
                let difficulty = match arg {
                    "" | "any" => None,
                    level => match level.parse::<Difficulty>() {
                        Ok(d) => Some(d),
                        Err(e) => {
                            println!("{}", e);
                            continue;
                        }
                    },
                };
                let outcome = controller.set_filter(Filter::Difficulty(difficulty)).await;
                report(&outcome, &controller.snapshot());
            }
            "page" => match arg.parse::<u32>() {
                Ok(page) => {
                    let outcome = controller.set_page(page).await;
                    report(&outcome, &controller.snapshot());
                }
                Err(_) => println!("page needs a number"),
            },
            "refresh" => report(&controller.refresh().await, &controller.snapshot()),
            "admin" => {
                controller = state.admin_controller();
                report(&controller.refresh().await, &controller.snapshot());
            }
            "catalog" => {
                controller = state.catalog_controller();
                report(&controller.refresh().await, &controller.snapshot());
            }
            "categories" => {
                for category in services::load_categories(state.api.as_ref()).await {
                    println!("  {}", category);
                }
            }
            "home" => {
                let home = services::load_home(state.api.as_ref()).await;
                println!(
                    "{} courses, {} students, {} instructors",
                    home.stats.total_courses, home.stats.total_students, home.stats.total_instructors
                );
                for course in &home.featured {
                    println!("  * {} ({})", course.title, course.instructor);
                }
            }
            "dashboard" => match services::load_student_dashboard(state.api.as_ref()).await {
                Ok(dashboard) => {
                    for enrollment in &dashboard.enrollments {
                        println!(
                            "  {:>5.1}% {:?} {}",
                            enrollment.progress_percent(),
                            enrollment.status,
                            enrollment.course.title
                        );
                    }
                }
                Err(e) => println!("{}", e),
            },
            "enrollments" => match services::load_admin_enrollments(state.api.as_ref()).await {
                Ok(records) => {
                    for record in &records {
                        println!("  #{} {} ${:.2}", record.id, record.status, record.amount);
                    }
                }
                Err(e) => println!("{}", e),
            },
            "show" => match arg.parse::<CourseId>() {
                Ok(id) => match state.api.get_course(id).await {
                    Ok(course) => println!("{:#?}", to_draft(&course)),
                    Err(e) => println!("Failed to load course: {}", e),
                },
                Err(_) => println!("show needs a course id"),
            },
            "delete" => {
                let Ok(id) = arg.parse::<CourseId>() else {
                    println!("delete needs a course id");
                    continue;
                };
                println!("Are you sure you want to delete course {}? [y/N]", id);
                let answer = lines.next_line().await?.unwrap_or_default();
                if !answer.trim().eq_ignore_ascii_case("y") {
                    continue;
                }
                match state.mutations().remove(id).await {
                    Ok(()) => report(&controller.refresh().await, &controller.snapshot()),
                    Err(e) => println!("{}", e.user_message()),
                }
            }
            _ => println!("{}", HELP),
        }
    }

    Ok(())
}

fn report(outcome: &FetchOutcome, view: &ViewState) {
    if let FetchOutcome::Failed(e) = outcome {
        warn!("fetch failed: {}", e);
    }
    if let Some(message) = &view.error {
        println!("! {}", message);
    }
    println!(
        "page {}/{} ({} courses)",
        view.query.page(),
        view.total_pages,
        view.items.len()
    );
    for course in &view.items {
        println!(
            "  [{}] {} - {} | {} | {} | {}h | ${}",
            course.id,
            course.title,
            course.instructor,
            course.category,
            course.difficulty,
            course.duration,
            course.price
        );
    }
}

