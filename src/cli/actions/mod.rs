pub mod server;
pub mod users;

#[derive(Debug)]
pub enum Action {
    Server(server::Args),
    Users(users::Args),
}

impl Action {
    /// Execute the action.
    ///
    /// # Errors
    /// Returns an error if the action fails.
    pub async fn execute(self) -> anyhow::Result<()> {
        match self {
            Self::Server(args) => server::execute(args).await,
            Self::Users(args) => users::execute(args).await,
        }
    }
}
