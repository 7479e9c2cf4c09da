//! Console front end.
//!
//! A numbered menu over the same `UserService` the HTTP gateway uses. Every
//! service error is printed and the menu comes back; only I/O failures on
//! the terminal itself end the loop early.

mod menu;
mod session;

use std::sync::Arc;

use tokio::io::{self, BufReader};

use user_service_lib::UserService;

pub use menu::MenuChoice;
pub use session::Console;

/// Run the menu on stdin/stdout until the user exits or input ends.
pub async fn run_stdio(users: Arc<dyn UserService>) -> io::Result<()> {
    let mut console = Console::new(users, BufReader::new(io::stdin()), io::stdout());
    console.run().await
}
