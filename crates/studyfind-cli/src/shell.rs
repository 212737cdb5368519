//! The interactive shell: a two-screen navigation stack over the controllers.

use std::sync::Arc;

use anyhow::Result;
use colored::Colorize;
use rustyline::Editor;
use rustyline::error::ReadlineError;
use rustyline::history::DefaultHistory;

use studyfind_application::{
    AppServices, ScreenPorts, SessionTracker, TodoCreationController, TodoListController,
};
use studyfind_core::auth::UserId;
use studyfind_core::ui::{BackGestureOutcome, ConfirmationOutcome, NavigationDirective};
use studyfind_infrastructure::LocalAuthProvider;

use crate::commands::{Command, help_text};
use crate::helper::ShellHelper;
use crate::render;
use crate::terminal::TerminalPorts;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Screen {
    List,
    Creation,
}

pub struct Shell {
    auth: Arc<LocalAuthProvider>,
    tracker: SessionTracker,
    list: Arc<TodoListController>,
    creation: Arc<TodoCreationController>,
    terminal: Arc<TerminalPorts>,
    stack: Vec<Screen>,
    /// Screen that opened the current confirmation; answers go back to it.
    dialog_owner: Option<Screen>,
}

impl Shell {
    pub fn new(services: &AppServices, auth: Arc<LocalAuthProvider>) -> Self {
        let terminal = Arc::new(TerminalPorts::default());
        let ports = ScreenPorts {
            navigator: terminal.clone(),
            dialog: terminal.clone(),
            notifier: terminal.clone(),
            back: terminal.clone(),
        };

        let tracker = services.session_tracker();
        let list = services.list_controller(&ports);
        let creation = services.creation_controller(&ports, &tracker);

        Self {
            auth,
            tracker,
            list,
            creation,
            terminal,
            stack: vec![Screen::List],
            dialog_owner: None,
        }
    }

    pub async fn run(mut self) -> Result<()> {
        let mut rl: Editor<ShellHelper, DefaultHistory> = Editor::new()?;
        rl.set_helper(Some(ShellHelper));

        println!("{}", "=== studyfind ===".bright_magenta().bold());
        println!("{}", "Type 'help' for commands, 'quit' to exit.".bright_black());
        println!();

        self.list.mount(self.tracker.current()).await;
        self.render().await;

        loop {
            match rl.readline(self.prompt()) {
                Ok(line) => {
                    let trimmed = line.trim();
                    if trimmed.is_empty() {
                        continue;
                    }
                    let _ = rl.add_history_entry(trimmed);

                    let command = match Command::parse(trimmed) {
                        Ok(command) => command,
                        Err(message) => {
                            println!("{}", message.yellow());
                            continue;
                        }
                    };

                    if command == Command::Quit {
                        println!("{}", "Goodbye!".bright_green());
                        break;
                    }
                    self.execute(command).await;
                    self.settle().await;
                    self.render().await;
                }
                Err(ReadlineError::Interrupted) => {
                    println!("{}", "CTRL-C detected. Type 'quit' to exit.".yellow());
                }
                Err(ReadlineError::Eof) => {
                    println!("{}", "CTRL-D detected. Exiting...".bright_green());
                    break;
                }
                Err(err) => {
                    eprintln!("{}", format!("Error: {:?}", err).red());
                    break;
                }
            }
        }

        self.shutdown().await;
        Ok(())
    }

    fn top(&self) -> Screen {
        self.stack.last().copied().unwrap_or(Screen::List)
    }

    fn prompt(&self) -> &'static str {
        match (self.top(), self.terminal.has_dialog()) {
            (_, true) => "yes/no> ",
            (Screen::List, false) => "todo> ",
            (Screen::Creation, false) => "new> ",
        }
    }

    async fn execute(&mut self, command: Command) {
        if self.terminal.has_dialog()
            && !matches!(command, Command::Yes | Command::No | Command::Help)
        {
            println!("{}", "Answer 'yes' or 'no' first.".yellow());
            return;
        }

        let origin = self.top();
        self.dispatch(command).await;
        if self.dialog_owner.is_none() && self.terminal.has_dialog() {
            self.dialog_owner = Some(origin);
        }
    }

    async fn dispatch(&mut self, command: Command) {
        match command {
            Command::Login(uid) => match UserId::new(uid) {
                Ok(uid) => {
                    self.auth.sign_in(uid);
                    self.list.on_session_changed(self.tracker.current()).await;
                }
                Err(err) => println!("{}", err.to_string().yellow()),
            },
            Command::Logout => {
                self.auth.sign_out();
                self.list.on_session_changed(None).await;
            }
            Command::Refresh => {
                if self.top() == Screen::List {
                    self.list.on_focus().await;
                } else {
                    self.wrong_screen();
                }
            }
            Command::New => {
                if self.top() == Screen::List {
                    self.list.open_creation();
                } else {
                    self.wrong_screen();
                }
            }
            Command::Title(text) => {
                if !self.on_creation() || !self.creation.set_title(text).await {
                    self.wrong_screen();
                }
            }
            Command::Detail(text) => {
                if !self.on_creation() || !self.creation.set_detail(text).await {
                    self.wrong_screen();
                }
            }
            Command::Save => {
                if !self.on_creation() || !self.creation.request_save().await {
                    println!("{}", "Nothing to save right now.".yellow());
                }
            }
            Command::Cancel => {
                if !self.on_creation() || !self.creation.request_discard().await {
                    println!("{}", "Nothing to cancel right now.".yellow());
                }
            }
            Command::Back => self.back().await,
            Command::Delete(n) => self.delete(n).await,
            Command::Yes => self.answer(ConfirmationOutcome::Proceed).await,
            Command::No => self.answer(ConfirmationOutcome::Cancel).await,
            Command::Help => println!("{}", help_text()),
            Command::Quit => {}
        }
    }

    fn on_creation(&self) -> bool {
        self.top() == Screen::Creation
    }

    fn wrong_screen(&self) {
        println!("{}", "That command does nothing on this screen.".yellow());
    }

    async fn delete(&self, n: usize) {
        if self.top() != Screen::List {
            self.wrong_screen();
            return;
        }
        let view = self.list.view().await;
        let Some(item) = view.items.get(n - 1) else {
            println!("{}", format!("There is no to-do #{n}.").yellow());
            return;
        };
        if !self.list.request_delete(item.id.clone()).await {
            println!("{}", "Cannot delete right now.".yellow());
        }
    }

    async fn answer(&mut self, outcome: ConfirmationOutcome) {
        if self.terminal.take_dialog().is_none() {
            println!("{}", "No question is open.".yellow());
            return;
        }
        let owner = self.dialog_owner.take().unwrap_or(self.top());
        match owner {
            Screen::List => self.list.resolve_confirmation(outcome).await,
            Screen::Creation => self.creation.resolve_confirmation(outcome).await,
        }
    }

    async fn back(&mut self) {
        match self.top() {
            Screen::List => println!("{}", "Already at the to-do list.".bright_black()),
            Screen::Creation => {
                if self.creation.on_back_gesture().await == BackGestureOutcome::PassThrough {
                    self.pop_to_list().await;
                }
            }
        }
    }

    /// Applies queued navigation directives.
    async fn settle(&mut self) {
        while let Some(directive) = self.terminal.next_directive() {
            match directive {
                NavigationDirective::OpenCreationScreen => {
                    if self.top() == Screen::List {
                        self.stack.push(Screen::Creation);
                        self.creation.mount().await;
                    }
                }
                NavigationDirective::ReturnToListScreen
                | NavigationDirective::ReturnToPreviousScreen => {
                    if self.top() == Screen::Creation {
                        self.pop_to_list().await;
                    }
                }
            }
        }
    }

    /// Leaves the creation screen; the list regains focus and re-reads.
    async fn pop_to_list(&mut self) {
        self.creation.unmount().await;
        self.stack.pop();
        self.list.on_focus().await;
    }

    async fn render(&self) {
        println!();
        match self.top() {
            Screen::List => render::list(&self.list.view().await, self.tracker.uid().as_ref()),
            Screen::Creation => render::creation(&self.creation.view().await),
        }
    }

    async fn shutdown(&self) {
        if self.top() == Screen::Creation {
            self.creation.unmount().await;
        }
        self.list.unmount().await;
        self.tracker.unmount();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use studyfind_application::ListStatus;
    use studyfind_core::config::AppConfig;
    use studyfind_core::todo::TodoRepository;
    use studyfind_infrastructure::MemoryDocumentStore;

    async fn signed_in_shell(titles: &[&str]) -> Shell {
        let uid = UserId::new("u1").unwrap();
        let auth = Arc::new(LocalAuthProvider::signed_in(uid.clone()));
        let services = AppServices::with_store(
            AppConfig::default(),
            auth.clone(),
            Arc::new(MemoryDocumentStore::new()),
        );
        for title in titles {
            services
                .repository()
                .create(Some(&uid), title, "x")
                .await
                .unwrap();
        }

        let shell = Shell::new(&services, auth);
        shell.list.mount(shell.tracker.current()).await;
        shell
    }

    async fn run(shell: &mut Shell, command: Command) {
        shell.execute(command).await;
        shell.settle().await;
    }

    #[tokio::test]
    async fn test_navigation_is_refused_while_delete_is_asked() {
        let mut shell = signed_in_shell(&["Read"]).await;

        run(&mut shell, Command::Delete(1)).await;
        assert!(shell.terminal.has_dialog());

        run(&mut shell, Command::New).await;
        assert_eq!(shell.top(), Screen::List);
        assert!(shell.terminal.has_dialog());

        run(&mut shell, Command::Yes).await;
        let view = shell.list.view().await;
        assert_eq!(view.pending_delete, None);
        assert_eq!(view.status, ListStatus::Empty);
        assert!(!shell.terminal.has_dialog());
    }

    #[tokio::test]
    async fn test_cancelled_delete_frees_the_gate() {
        let mut shell = signed_in_shell(&["Read"]).await;

        run(&mut shell, Command::Delete(1)).await;
        run(&mut shell, Command::No).await;
        assert_eq!(shell.list.view().await.pending_delete, None);

        run(&mut shell, Command::Delete(1)).await;
        assert!(shell.terminal.has_dialog());
        run(&mut shell, Command::Yes).await;
        assert!(shell.list.view().await.items.is_empty());
    }

    #[tokio::test]
    async fn test_save_answer_reaches_creation_screen() {
        let mut shell = signed_in_shell(&[]).await;

        run(&mut shell, Command::New).await;
        assert_eq!(shell.top(), Screen::Creation);
        run(&mut shell, Command::Title("Read".to_string())).await;
        run(&mut shell, Command::Detail("Ch.1".to_string())).await;

        run(&mut shell, Command::Save).await;
        assert_eq!(shell.dialog_owner, Some(Screen::Creation));

        run(&mut shell, Command::Back).await;
        assert_eq!(shell.top(), Screen::Creation);

        run(&mut shell, Command::Yes).await;
        assert_eq!(shell.top(), Screen::List);
        assert_eq!(shell.dialog_owner, None);

        let view = shell.list.view().await;
        assert_eq!(view.items.len(), 1);
        assert_eq!(view.items[0].title, "Read");
    }
}
