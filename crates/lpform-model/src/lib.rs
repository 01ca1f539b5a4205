pub mod builder;
pub mod form;
pub mod report;
pub mod session;

pub use builder::{build_problem, parse_relation, BuildError};
pub use form::{Cell, ConstraintRow, CountField, FormError, FormState};
pub use report::{Assignment, Report};
pub use session::{solve_form, Session, SolveError};
