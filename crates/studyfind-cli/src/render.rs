use colored::Colorize;

use studyfind_application::{CreationGate, CreationPhase, CreationView, ListStatus, ListView};
use studyfind_core::auth::UserId;

pub fn list(view: &ListView, user: Option<&UserId>) {
    let header = match user {
        Some(uid) => format!("=== To-do ({uid}) ==="),
        None => "=== To-do ===".to_string(),
    };
    println!("{}", header.bright_magenta().bold());

    match (view.status, user) {
        (ListStatus::Loading, None) => {
            println!("{}", "Sign in with 'login <uid>' to see your to-dos.".bright_black());
        }
        (ListStatus::Loading, Some(_)) => println!("{}", "Loading...".bright_black()),
        (ListStatus::Empty, _) => {
            println!("{}", "Nothing to do yet. Type 'new' to add one.".bright_black());
        }
        (ListStatus::Populated | ListStatus::Error, _) => {
            for (i, item) in view.items.iter().enumerate() {
                println!("{} {}", format!("{:>3}.", i + 1).cyan(), item.title.bold());
                for line in item.detail.lines() {
                    println!("      {}", line);
                }
            }
            if view.status == ListStatus::Error {
                println!("{}", "(showing the last list that loaded)".yellow());
            }
        }
    }

    if view.refreshing {
        println!("{}", "(refreshing...)".bright_black());
    }
}

pub fn creation(view: &CreationView) {
    println!("{}", "=== New to-do ===".bright_magenta().bold());
    println!("{} {}", "Title: ".cyan(), view.draft.title);
    println!("{}", "Detail:".cyan());
    for line in view.draft.detail.lines() {
        println!("  {}", line);
    }

    match (view.phase, view.gate) {
        (_, Some(CreationGate::Save)) => println!("{}", "(waiting for save confirmation)".bright_black()),
        (_, Some(CreationGate::Discard)) => {
            println!("{}", "(waiting for discard confirmation)".bright_black())
        }
        (CreationPhase::Editing, None) if view.saving => println!("{}", "(saving...)".bright_black()),
        (CreationPhase::Editing, None) if view.draft.is_dirty() => {
            println!("{}", "(unsaved)".bright_black())
        }
        (CreationPhase::Editing, None) => println!(
            "{}",
            "Use 'title', 'detail', then 'save' or 'cancel'.".bright_black()
        ),
        _ => {}
    }
}
