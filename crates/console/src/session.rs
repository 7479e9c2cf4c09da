//! The interactive menu loop.

use std::sync::Arc;

use tokio::io::{self, AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};

use common::AppError;
use domain::validation::{parse_age, parse_id};
use domain::{CreateUser, DomainResult, UpdateUser};
use user_service_lib::UserService;

use crate::menu::MenuChoice;

/// Whether the loop keeps going after an action.
enum Flow {
    Continue,
    Exit,
}

/// Menu loop over any line-based input and any output.
pub struct Console<R, W> {
    users: Arc<dyn UserService>,
    input: R,
    output: W,
}

impl<R, W> Console<R, W>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    pub fn new(users: Arc<dyn UserService>, input: R, output: W) -> Self {
        Self {
            users,
            input,
            output,
        }
    }

    /// Give back the output, e.g. to inspect what was printed.
    pub fn into_output(self) -> W {
        self.output
    }

    /// Show the menu until Exit is chosen or input runs out.
    pub async fn run(&mut self) -> io::Result<()> {
        tracing::info!("Console session started");

        loop {
            self.print_menu().await?;
            let Some(answer) = self.read_line().await? else {
                break;
            };

            let flow = match MenuChoice::parse(&answer) {
                Some(MenuChoice::Create) => self.create().await?,
                Some(MenuChoice::FindById) => self.find_by_id().await?,
                Some(MenuChoice::ListAll) => self.list_all().await?,
                Some(MenuChoice::Update) => self.update().await?,
                Some(MenuChoice::Delete) => self.delete().await?,
                Some(MenuChoice::Exit) => Flow::Exit,
                None => {
                    self.say("Invalid choice, please try again.").await?;
                    Flow::Continue
                }
            };

            if let Flow::Exit = flow {
                break;
            }
        }

        self.say("Goodbye.").await?;
        tracing::info!("Console session ended");
        Ok(())
    }

    async fn print_menu(&mut self) -> io::Result<()> {
        let mut text = String::from("\nMenu:\n");
        for choice in MenuChoice::ALL {
            text.push_str(&format!("{}\n", choice));
        }
        text.push_str("Choose an option: ");
        self.write(&text).await
    }

    async fn create(&mut self) -> io::Result<Flow> {
        let Some(name) = self.prompt("Name: ").await? else {
            return Ok(Flow::Exit);
        };
        let Some(email) = self.prompt("Email: ").await? else {
            return Ok(Flow::Exit);
        };
        let Some(age) = self.prompt_parsed("Age: ", parse_age).await? else {
            return Ok(Flow::Exit);
        };

        let request = CreateUser {
            name,
            email,
            age: Some(age),
            created_at: None,
        };
        match self.users.create_user(request).await {
            Ok(user) => self.say(&format!("User created: {}", user)).await?,
            Err(e) => self.report(e).await?,
        }
        Ok(Flow::Continue)
    }

    async fn find_by_id(&mut self) -> io::Result<Flow> {
        let Some(id) = self.prompt_parsed("User id: ", parse_id).await? else {
            return Ok(Flow::Exit);
        };

        match self.users.get_user(id).await {
            Ok(user) => self.say(&format!("User found: {}", user)).await?,
            Err(e) => self.report(e).await?,
        }
        Ok(Flow::Continue)
    }

    async fn list_all(&mut self) -> io::Result<Flow> {
        match self.users.list_users().await {
            Ok(users) if users.is_empty() => self.say("No users found.").await?,
            Ok(users) => {
                self.say("Users:").await?;
                for user in users {
                    self.say(&user.to_string()).await?;
                }
            }
            Err(e) => self.report(e).await?,
        }
        Ok(Flow::Continue)
    }

    async fn update(&mut self) -> io::Result<Flow> {
        let Some(id) = self.prompt_parsed("User id to update: ", parse_id).await? else {
            return Ok(Flow::Exit);
        };

        let current = match self.users.get_user(id).await {
            Ok(user) => user,
            Err(e) => {
                self.report(e).await?;
                return Ok(Flow::Continue);
            }
        };

        // Empty answers keep the current value
        let Some(name) = self
            .prompt(&format!("New name (current: {}): ", current.name))
            .await?
        else {
            return Ok(Flow::Exit);
        };
        let Some(email) = self
            .prompt(&format!("New email (current: {}): ", current.email))
            .await?
        else {
            return Ok(Flow::Exit);
        };
        let Some(age) = self
            .prompt_optional_age(&format!("New age (current: {}): ", current.age))
            .await?
        else {
            return Ok(Flow::Exit);
        };

        let request = UpdateUser {
            name: Some(name),
            email: Some(email),
            age,
        };
        match self.users.update_user(id, request).await {
            Ok(user) => self.say(&format!("User updated: {}", user)).await?,
            Err(e) => self.report(e).await?,
        }
        Ok(Flow::Continue)
    }

    async fn delete(&mut self) -> io::Result<Flow> {
        let Some(id) = self.prompt_parsed("User id to delete: ", parse_id).await? else {
            return Ok(Flow::Exit);
        };

        match self.users.delete_user(id).await {
            Ok(()) => self.say(&format!("User with id {} deleted", id)).await?,
            Err(e) => self.report(e).await?,
        }
        Ok(Flow::Continue)
    }

    /// Ask until `parse` accepts the answer. `None` means input ended.
    async fn prompt_parsed<T>(
        &mut self,
        label: &str,
        parse: fn(&str) -> DomainResult<T>,
    ) -> io::Result<Option<T>> {
        loop {
            let Some(answer) = self.prompt(label).await? else {
                return Ok(None);
            };
            match parse(&answer) {
                Ok(value) => return Ok(Some(value)),
                Err(e) => self.report(e.into()).await?,
            }
        }
    }

    /// Like `prompt_parsed` for age, but an empty answer is `Some(None)`.
    async fn prompt_optional_age(&mut self, label: &str) -> io::Result<Option<Option<i32>>> {
        loop {
            let Some(answer) = self.prompt(label).await? else {
                return Ok(None);
            };
            if answer.trim().is_empty() {
                return Ok(Some(None));
            }
            match parse_age(&answer) {
                Ok(age) => return Ok(Some(Some(age))),
                Err(e) => self.report(e.into()).await?,
            }
        }
    }

    async fn prompt(&mut self, label: &str) -> io::Result<Option<String>> {
        self.write(label).await?;
        self.read_line().await
    }

    async fn report(&mut self, error: AppError) -> io::Result<()> {
        tracing::debug!("Console operation failed: {}", error);
        self.say(&format!("Error: {}", error.user_message())).await
    }

    /// Next line without its terminator, or `None` at end of input.
    async fn read_line(&mut self) -> io::Result<Option<String>> {
        let mut line = String::new();
        if self.input.read_line(&mut line).await? == 0 {
            return Ok(None);
        }
        let trimmed = line.trim_end_matches(['\r', '\n']).len();
        line.truncate(trimmed);
        Ok(Some(line))
    }

    async fn say(&mut self, text: &str) -> io::Result<()> {
        self.write(text).await?;
        self.write("\n").await
    }

    async fn write(&mut self, text: &str) -> io::Result<()> {
        self.output.write_all(text.as_bytes()).await?;
        self.output.flush().await
    }
}
