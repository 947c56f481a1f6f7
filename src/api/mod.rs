pub mod cli;
pub mod http;

pub use cli::{CliHandler, Cli, Commands, CliError};
pub use http::{
    create_router, error_status, ApiServer, ApiError, AppState, BalanceResponse, BlockCountResponse,
    CurrencyResponse, DifficultyResponse, ErrorResponse, ValidationResponse,
};
