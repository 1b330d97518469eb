//! ROSTER Service — user lifecycle orchestration, role registration,
//! access control primitives, and the credential store used by the
//! transport boundary.

pub mod access;
pub mod credentials;
pub mod dto;
pub mod password;
pub mod roles;
pub mod users;

pub use access::Actor;
pub use credentials::{Credential, CredentialStore, MemoryCredentialStore};
pub use dto::{CreateRoleInput, CreateUserInput, RoleView, UpdateUserInput, UserView};
pub use roles::RoleService;
pub use users::UserService;
