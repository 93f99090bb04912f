/*
[INPUT]:  Parsed subcommand, controller wired to the task API
[OUTPUT]: Plain-text task listings, command output, notifications on stderr
[POS]:    Scripting CLI - one-shot controller actions
[UPDATE]: When adding subcommands or changing their output
*/

use anyhow::{Context, Result, anyhow};
use async_trait::async_trait;
use clap::Subcommand;
use dialoguer::theme::ColorfulTheme;
use unicode_width::UnicodeWidthStr;

use taskpanel::output::OutputView;
use taskpanel::{Confirm, ConfirmRequest, Controller, Decision, NotificationCenter, ViewState};
use taskpanel_client::{Task, TaskClient};

#[derive(Subcommand, Debug)]
pub enum Command {
    /// List all tasks
    List,
    /// Search tasks by name
    Search { name: String },
    /// Run a task's command and print the latest execution
    Run { id: String },
    /// Delete a task after confirmation
    Delete {
        id: String,
        /// Skip the confirmation prompt
        #[arg(long)]
        yes: bool,
    },
}

/// Runs one command. Returns `false` when the action reported an error.
pub async fn run_command(
    command: Command,
    controller: &Controller<TaskClient, NotificationCenter>,
) -> Result<bool> {
    let state = ViewState::default();
    let _final_state = match command {
        Command::List => {
            let state = controller.load(state).await;
            print_tasks(&state.tasks);
            state
        }
        Command::Search { name } => {
            let state = controller.search(state, &name).await;
            print_tasks(&state.tasks);
            state
        }
        Command::Run { id } => {
            let state = controller.load(state).await;
            let task = find_task(&state, &id).inspect_err(|_| report(controller.notifier()))?;
            let state = controller.run(state, &task).await;
            if let Some(selected) = state.selected_task_for_output.as_ref() {
                println!("{}", OutputView::from_task(selected).to_text());
            }
            state
        }
        Command::Delete { id, yes } => {
            let state = controller.load(state).await;
            let task = find_task(&state, &id).inspect_err(|_| report(controller.notifier()))?;
            if yes {
                controller.delete(state, &task, &mut Decision::Confirmed).await
            } else {
                controller.delete(state, &task, &mut PromptConfirm).await
            }
        }
    };

    let notifications = controller.notifier();
    report(notifications);
    Ok(!notifications.has_errors())
}

/// Flush collected notifications to stderr.
fn report(notifications: &NotificationCenter) {
    for notification in notifications.snapshot() {
        eprintln!("{notification}");
    }
}

fn find_task(state: &ViewState, id: &str) -> Result<Task> {
    state
        .tasks
        .iter()
        .find(|task| task.id.as_deref() == Some(id))
        .cloned()
        .ok_or_else(|| anyhow!("task not found: {id}"))
}

fn print_tasks(tasks: &[Task]) {
    if tasks.is_empty() {
        println!("No tasks found");
        return;
    }
    let id_width = column_width(tasks.iter().map(|t| t.id.as_deref().unwrap_or("-")), "ID");
    let name_width = column_width(tasks.iter().map(|t| t.name.as_str()), "NAME");
    let owner_width = column_width(tasks.iter().map(|t| t.owner.as_str()), "OWNER");
    let server_width = column_width(tasks.iter().map(|t| t.server_name.as_str()), "SERVER");

    println!(
        "{}  {}  {}  {}  COMMAND",
        pad("ID", id_width),
        pad("NAME", name_width),
        pad("OWNER", owner_width),
        pad("SERVER", server_width)
    );
    for task in tasks {
        println!(
            "{}  {}  {}  {}  {}",
            pad(task.id.as_deref().unwrap_or("-"), id_width),
            pad(&task.name, name_width),
            pad(&task.owner, owner_width),
            pad(&task.server_name, server_width),
            task.command
        );
    }
}

fn column_width<'a>(values: impl Iterator<Item = &'a str>, header: &str) -> usize {
    values
        .map(UnicodeWidthStr::width)
        .chain(std::iter::once(header.width()))
        .max()
        .unwrap_or(0)
}

fn pad(text: &str, width: usize) -> String {
    let fill = width.saturating_sub(text.width());
    format!("{text}{}", " ".repeat(fill))
}

/// Terminal yes/no prompt, defaulting to "no".
struct PromptConfirm;

#[async_trait]
impl Confirm for PromptConfirm {
    async fn confirm(&mut self, request: &ConfirmRequest) -> Decision {
        let prompt = format!("{} {}", request.title, request.content);
        let answer = tokio::task::spawn_blocking(move || {
            let theme = ColorfulTheme::default();
            dialoguer::Confirm::with_theme(&theme)
                .with_prompt(prompt)
                .default(false)
                .interact()
                .context("read confirmation")
        })
        .await;
        match answer {
            Ok(Ok(true)) => Decision::Confirmed,
            Ok(Ok(false)) => Decision::Cancelled,
            Ok(Err(err)) => {
                tracing::warn!(error = %err, "confirmation prompt failed; treating as cancelled");
                Decision::Cancelled
            }
            Err(err) => {
                tracing::warn!(error = %err, "confirmation prompt panicked; treating as cancelled");
                Decision::Cancelled
            }
        }
    }
}
