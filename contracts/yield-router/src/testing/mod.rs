pub mod mock_querier;

mod utils;

mod tests;
