//! Built-in target programs and their reference solvers.
pub mod kirk;
pub mod ragnarok;
