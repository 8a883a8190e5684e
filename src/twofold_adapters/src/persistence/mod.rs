pub mod hashmap_two_factor_store;
pub mod hashmap_user_store;

pub use hashmap_two_factor_store::HashMapTwoFactorStore;
pub use hashmap_user_store::HashMapUserStore;
