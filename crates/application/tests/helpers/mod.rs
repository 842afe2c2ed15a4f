pub mod mock_resolvers;

pub use mock_resolvers::{CountingResolver, FixedResolver, MockResolver};
