//! Line-oriented session over one repository.
//!
//! The session keeps the public/admin toggle, the public selection and the
//! admin form/dialog state between commands, the way a single page would.

use std::str::FromStr;

use storyline::application::error::{AppError, ErrorReport};
use storyline::application::posts::PostRepository;
use storyline::application::views::{AdminView, PostSelector, PublicView, Screen};
use storyline::domain::posts::PostField;
use storyline::presentation::views::{
    render_admin_list, render_confirm_delete, render_form, render_public_list, render_public_post,
};
use tracing::debug;

use crate::io::{Input, print_view, prompt, read_line, stdin_lines};

use super::admin;

const HELP: &str = "\
commands:
  blog              show the public view
  admin             show the admin view
  toggle            switch between the two views
  open N            read post N (or a post id)
  back              return to the list
  new               write a new post
  edit N            edit post N
  delete N          delete post N
  refresh           reload posts from the store
  help              show this help
  quit              leave";

const KEEP_HINT: &str = "(enter keeps the current value, :cancel closes the form)";
const CANCEL: &str = ":cancel";

#[derive(Debug, Clone, PartialEq, Eq)]
enum ShellCommand {
    Blog,
    Admin,
    Toggle,
    Open(PostSelector),
    Back,
    New,
    Edit(PostSelector),
    Delete(PostSelector),
    Refresh,
    Help,
    Quit,
}

impl FromStr for ShellCommand {
    type Err = String;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let mut words = line.split_whitespace();
        let name = words.next().unwrap_or_default();
        let arg = words.next();
        if words.next().is_some() {
            return Err(format!("too many arguments for `{name}`"));
        }

        let selector = |arg: Option<&str>| -> Result<PostSelector, String> {
            arg.ok_or_else(|| format!("`{name}` needs a post number"))?
                .parse::<PostSelector>()
                .map_err(|err| err.to_string())
        };

        let command = match name {
            "blog" => ShellCommand::Blog,
            "admin" => ShellCommand::Admin,
            "toggle" => ShellCommand::Toggle,
            "open" => ShellCommand::Open(selector(arg)?),
            "back" => ShellCommand::Back,
            "new" => ShellCommand::New,
            "edit" => ShellCommand::Edit(selector(arg)?),
            "delete" => ShellCommand::Delete(selector(arg)?),
            "refresh" => ShellCommand::Refresh,
            "help" | "?" => ShellCommand::Help,
            "quit" | "exit" => ShellCommand::Quit,
            other => return Err(format!("unknown command `{other}`; try `help`")),
        };
        Ok(command)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum NextStep {
    Retry,
    Edit,
    Cancel,
}

impl FromStr for NextStep {
    type Err = ();

    fn from_str(answer: &str) -> Result<Self, Self::Err> {
        match answer.trim().to_ascii_lowercase().as_str() {
            "" | "r" | "retry" => Ok(NextStep::Retry),
            "e" | "edit" => Ok(NextStep::Edit),
            "c" | "cancel" | CANCEL => Ok(NextStep::Cancel),
            _ => Err(()),
        }
    }
}

/// Asks what to do after a failed save; end of input cancels.
async fn next_step(input: &mut Input) -> Result<NextStep, AppError> {
    loop {
        prompt("Save failed. [r]etry, [e]dit or :cancel? ")?;
        let Some(answer) = read_line(input).await? else {
            return Ok(NextStep::Cancel);
        };
        if let Ok(step) = answer.parse() {
            return Ok(step);
        }
    }
}

#[derive(Debug, Default)]
struct Session {
    screen: Screen,
    public: PublicView,
    admin: AdminView,
}

pub async fn run(repo: &mut PostRepository) -> Result<(), AppError> {
    let mut session = Session::default();
    let mut input = stdin_lines();

    repo.activate().await;
    session.render(repo)?;

    loop {
        prompt(session.prompt())?;
        let Some(line) = read_line(&mut input).await? else {
            break;
        };
        if line.trim().is_empty() {
            continue;
        }

        let command = match line.parse::<ShellCommand>() {
            Ok(ShellCommand::Quit) => break,
            Ok(command) => command,
            Err(message) => {
                println!("{message}");
                continue;
            }
        };

        if let Err(err) = session.apply(command, repo, &mut input).await {
            report(&err);
        }
    }

    Ok(())
}

/// Errors inside the session are shown and the session carries on.
fn report(err: &AppError) {
    debug!(error = %ErrorReport::from_error(err).joined(), "shell command failed");
    match err {
        AppError::ValidationFailed(_) | AppError::OperationFailed => {}
        AppError::Domain(inner) => println!("{inner}"),
        other => println!("{}", other.presentation_message()),
    }
}

impl Session {
    fn prompt(&self) -> &'static str {
        match self.screen {
            Screen::Public => "blog> ",
            Screen::Admin => "admin> ",
        }
    }

    fn render(&self, repo: &PostRepository) -> Result<(), AppError> {
        let text = match self.screen {
            Screen::Public => match self.public.selected(repo.posts()) {
                Some(post) => render_public_post(post)?,
                None => render_public_list(repo)?,
            },
            Screen::Admin => render_admin_list(repo)?,
        };
        print_view(&text);
        Ok(())
    }

    async fn apply(
        &mut self,
        command: ShellCommand,
        repo: &mut PostRepository,
        input: &mut Input,
    ) -> Result<(), AppError> {
        match command {
            ShellCommand::Blog => self.screen = Screen::Public,
            ShellCommand::Admin => self.screen = Screen::Admin,
            ShellCommand::Toggle => self.screen = self.screen.toggle(),
            ShellCommand::Open(selector) => {
                self.screen = Screen::Public;
                self.public.select(repo.posts(), selector)?;
            }
            ShellCommand::Back => self.public.back(),
            ShellCommand::New => {
                self.screen = Screen::Admin;
                self.admin.open_create();
                return self.fill_and_submit(repo, input).await;
            }
            ShellCommand::Edit(selector) => {
                self.screen = Screen::Admin;
                self.admin.open_edit(repo.posts(), selector)?;
                return self.fill_and_submit(repo, input).await;
            }
            ShellCommand::Delete(selector) => {
                self.screen = Screen::Admin;
                let dialog = self.admin.request_delete(repo.posts(), selector)?;
                print_view(&render_confirm_delete(dialog)?);
                return admin::delete(&mut self.admin, repo, input, false).await;
            }
            ShellCommand::Refresh => {
                repo.list().await;
            }
            ShellCommand::Help => {
                println!("{HELP}");
                return Ok(());
            }
            ShellCommand::Quit => return Ok(()),
        }
        self.render(repo)
    }

    /// Prompts for every field, then for the fields that failed validation,
    /// until the form saves or the user cancels. A failed save keeps the
    /// form and its values open for another attempt.
    async fn fill_and_submit(
        &mut self,
        repo: &mut PostRepository,
        input: &mut Input,
    ) -> Result<(), AppError> {
        println!("{KEEP_HINT}");
        let mut fields = PostField::ALL.to_vec();
        loop {
            for field in fields {
                if !self.prompt_field(field, input).await? {
                    return Ok(self.cancel_form());
                }
            }

            fields = match admin::submit(&mut self.admin, repo).await {
                Err(AppError::ValidationFailed(errors)) => PostField::ALL
                    .into_iter()
                    .filter(|field| errors.contains(*field))
                    .collect(),
                Err(AppError::OperationFailed) => {
                    if let Some(form) = self.admin.form() {
                        print_view(&render_form(form)?);
                    }
                    match next_step(input).await? {
                        NextStep::Retry => Vec::new(),
                        NextStep::Edit => {
                            println!("{KEEP_HINT}");
                            PostField::ALL.to_vec()
                        }
                        NextStep::Cancel => return Ok(self.cancel_form()),
                    }
                }
                other => return other,
            };
        }
    }

    fn cancel_form(&mut self) {
        self.admin.close_form();
        println!("Cancelled.");
    }

    /// Returns `false` when the user cancels or input ends.
    async fn prompt_field(&mut self, field: PostField, input: &mut Input) -> Result<bool, AppError> {
        let form = self
            .admin
            .form_mut()
            .ok_or(AppError::NothingOpen("post form"))?;

        match field {
            PostField::Content => {
                println!("{} (end with a line containing only `.`):", field.label());
                let mut lines = Vec::new();
                loop {
                    let Some(line) = read_line(input).await? else {
                        return Ok(false);
                    };
                    if line == CANCEL {
                        return Ok(false);
                    }
                    if line == "." {
                        break;
                    }
                    lines.push(line);
                }
                if !lines.is_empty() {
                    form.set(field, lines.join("\n"));
                }
            }
            PostField::Title | PostField::Author => {
                let current = form.values().get(field);
                prompt(&format!("{} [{}]: ", field.label(), current))?;
                let Some(line) = read_line(input).await? else {
                    return Ok(false);
                };
                if line == CANCEL {
                    return Ok(false);
                }
                if !line.is_empty() {
                    form.set(field, line);
                }
            }
        }
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use std::num::NonZeroUsize;

    use super::*;

    #[test]
    fn parses_commands_with_selectors() {
        assert_eq!("blog".parse::<ShellCommand>(), Ok(ShellCommand::Blog));
        assert_eq!(
            " open 2 ".parse::<ShellCommand>(),
            Ok(ShellCommand::Open(PostSelector::Position(
                NonZeroUsize::new(2).expect("non-zero")
            )))
        );
        assert_eq!("exit".parse::<ShellCommand>(), Ok(ShellCommand::Quit));
    }

    #[test]
    fn rejects_missing_or_extra_arguments() {
        assert!("edit".parse::<ShellCommand>().is_err());
        assert!("delete 1 2".parse::<ShellCommand>().is_err());
        assert!("open 0".parse::<ShellCommand>().is_err());
        assert!("publish".parse::<ShellCommand>().is_err());
    }

    #[test]
    fn failed_save_answers() {
        assert_eq!("".parse::<NextStep>(), Ok(NextStep::Retry));
        assert_eq!(" Edit ".parse::<NextStep>(), Ok(NextStep::Edit));
        assert_eq!(":cancel".parse::<NextStep>(), Ok(NextStep::Cancel));
        assert!("maybe".parse::<NextStep>().is_err());
    }

    #[test]
    fn prompt_follows_the_screen() {
        let mut session = Session::default();
        assert_eq!(session.prompt(), "blog> ");
        session.screen = session.screen.toggle();
        assert_eq!(session.prompt(), "admin> ");
    }
}
