//! Line-oriented shell over `gentle_core`.
//!
//! # Responsibility
//! - Host the reminder loop and the task editor in one process.
//! - Translate typed commands into editor operations and print results.
//! - Keep every business rule inside `gentle_core`.

use gentle_core::{
    core_version, default_log_level, init_logging, logging_status, reminder, DesktopNotifier,
    EditorError, EditorMode, JsonTaskStore, SharedStore, TaskEditor,
};
use log::{info, warn};
use std::io::{self, Write};
use std::path::PathBuf;
use std::sync::{Arc, OnceLock};

const TASKS_FILE_ENV: &str = "GENTLE_TASKS_FILE";
const LOG_DIR_ENV: &str = "GENTLE_LOG_DIR";
const DEFAULT_TASKS_FILE: &str = "tasks.json";
const DEFAULT_LOG_DIR_NAME: &str = "gentle-reminder-logs";

static TASKS_FILE: OnceLock<PathBuf> = OnceLock::new();
static LOG_DIR: OnceLock<PathBuf> = OnceLock::new();

fn main() {
    let log_dir = resolve_log_dir();
    if let Err(err) = init_logging(default_log_level(), &log_dir.to_string_lossy()) {
        eprintln!("Warning: file logging disabled: {err}");
    }
    info!("event=app_start module=cli status=ok version={}", core_version());

    let tasks_file = resolve_tasks_file();
    let store = SharedStore::new(JsonTaskStore::new(&tasks_file));
    // Never joined; process exit tears the loop down.
    let _reminder = reminder::spawn(store.clone(), Arc::new(DesktopNotifier::new()));

    let mut editor = TaskEditor::new(store);
    if let Err(err) = editor.refresh() {
        report("startup", &err);
    }

    println!("Gentle Reminder");
    println!("Tasks file: {}", tasks_file.display());
    if let Some((level, dir)) = logging_status() {
        println!("Logging {level} to {}", dir.display());
    }
    print_help();
    render(&editor);

    loop {
        let prompt = match editor.mode() {
            EditorMode::Edit { .. } => "(edit pending)> ",
            EditorMode::Create => "> ",
        };
        let Some(line) = read_line(prompt) else { break };
        let input = line.trim();
        if input.is_empty() {
            continue;
        }

        let (command, rest) = match input.split_once(char::is_whitespace) {
            Some((head, tail)) => (head, tail.trim()),
            None => (input, ""),
        };
        match command {
            "list" => run_list(&mut editor),
            "select" => run_select(&mut editor, rest),
            "add" => run_add(&mut editor),
            "edit" => run_edit(&mut editor),
            "delete" => run_delete(&mut editor),
            "cancel" => {
                editor.cancel_edit();
                println!("Edit abandoned.");
            }
            "help" => print_help(),
            "quit" | "exit" => break,
            other => println!("Unknown command `{other}` (try `help`)."),
        }
    }

    info!("event=app_exit module=cli status=ok");
    println!("Bye.");
}

fn run_list(editor: &mut TaskEditor<JsonTaskStore>) {
    match editor.refresh() {
        Ok(()) => render(editor),
        Err(err) => report("list", &err),
    }
}

fn run_select(editor: &mut TaskEditor<JsonTaskStore>, rest: &str) {
    if rest.is_empty() {
        editor.clear_selection();
        render(editor);
        return;
    }
    match rest.parse::<usize>() {
        Ok(index) => {
            editor.select(index);
            render(editor);
        }
        Err(_) => println!("Usage: select N (a row number from `list`)."),
    }
}

fn run_add(editor: &mut TaskEditor<JsonTaskStore>) {
    if matches!(editor.mode(), EditorMode::Edit { .. }) {
        println!("An edit is pending; finish it or `cancel` first.");
        return;
    }
    let Some(name) = read_line("Task name: ") else { return };
    let Some(time) = read_line("Time (HH:MM AM/PM): ") else { return };
    match editor.submit(&name, &time) {
        Ok(()) => {
            println!("Added.");
            render(editor);
        }
        Err(err) => report("add", &err),
    }
}

fn run_edit(editor: &mut TaskEditor<JsonTaskStore>) {
    let prefill = match editor.begin_edit() {
        Ok(prefill) => prefill,
        Err(err) => {
            report("edit", &err);
            return;
        }
    };

    // Blank input keeps the shown value, including the stored 24-hour
    // time, which does not pass the 12-hour check and must be retyped.
    let Some(name_input) = read_line(&format!("Task name [{}]: ", prefill.name)) else {
        return;
    };
    let Some(time_input) = read_line(&format!("Time [{}]: ", prefill.time)) else {
        return;
    };
    let name = if name_input.is_empty() {
        prefill.name
    } else {
        name_input
    };
    let time = if time_input.is_empty() {
        prefill.time
    } else {
        time_input
    };

    match editor.submit(&name, &time) {
        Ok(()) => {
            println!("Saved.");
            render(editor);
        }
        Err(err) => {
            report("edit", &err);
            println!("Edit still pending; run `edit` to retry or `cancel`.");
        }
    }
}

fn run_delete(editor: &mut TaskEditor<JsonTaskStore>) {
    match editor.delete() {
        Ok(removed) => {
            println!("Deleted `{}`.", removed.name);
            render(editor);
        }
        Err(err) => report("delete", &err),
    }
}

fn render(editor: &TaskEditor<JsonTaskStore>) {
    let tasks = editor.visible();
    if tasks.is_empty() {
        println!("No tasks.");
        return;
    }
    for (index, task) in tasks.iter().enumerate() {
        let marker = if editor.selection() == Some(index) {
            '>'
        } else {
            ' '
        };
        println!("{marker} {index}. {} at {}", task.name, task.time);
    }
}

fn report(command: &str, err: &EditorError) {
    println!("Warning: {err}");
    warn!(
        "event=command module=cli status=error command={command} error={}",
        err.label()
    );
}

fn print_help() {
    println!("Commands:");
    println!("  list       reload and list tasks");
    println!("  select N   pick the row later commands act on (bare `select` unpicks)");
    println!("  add        create a task (prompts for name and time)");
    println!("  edit       rewrite the selected task (blank keeps the shown value)");
    println!("  delete     remove the selected task");
    println!("  cancel     abandon a pending edit");
    println!("  help       show this help");
    println!("  quit       exit");
}

fn read_line(prompt: &str) -> Option<String> {
    print!("{prompt}");
    let _ = io::stdout().flush();
    let mut buf = String::new();
    match io::stdin().read_line(&mut buf) {
        Ok(0) => None,
        Ok(_) => Some(buf.trim_end().to_string()),
        Err(err) => {
            warn!("event=stdin_read module=cli status=error error={err}");
            None
        }
    }
}

fn resolve_tasks_file() -> PathBuf {
    TASKS_FILE
        .get_or_init(|| {
            if let Ok(raw) = std::env::var(TASKS_FILE_ENV) {
                let trimmed = raw.trim();
                if !trimmed.is_empty() {
                    return PathBuf::from(trimmed);
                }
            }
            PathBuf::from(DEFAULT_TASKS_FILE)
        })
        .clone()
}

fn resolve_log_dir() -> PathBuf {
    LOG_DIR
        .get_or_init(|| {
            if let Ok(raw) = std::env::var(LOG_DIR_ENV) {
                let trimmed = raw.trim();
                if !trimmed.is_empty() {
                    return PathBuf::from(trimmed);
                }
            }
            std::env::temp_dir().join(DEFAULT_LOG_DIR_NAME)
        })
        .clone()
}
