//! Application layer: match configuration and wiring.
//!
//! The container turns a [`MatchConfig`] into a ready-to-run
//! [`crate::moderator::Moderator`] with seeded participants.
//!
//! # Usage
//!
//! ```
//! use gearbox::app::{App, MatchConfig};
//!
//! let app = App::new();
//! let config = MatchConfig::new(3).with_rounds(5).with_seed(42);
//! let mut moderator = app.create_match(&config)?;
//! let summary = moderator.run(config.rounds)?;
//! assert_eq!(summary.turns, 5);
//! # Ok::<(), gearbox::Error>(())
//! ```
//!
//! ## Testing
//!
//! ```
//! use gearbox::app::App;
//! use gearbox::rps::AgentKind;
//!
//! let app = App::for_testing()
//!     .with_default_seed(7)
//!     .with_default_agent(AgentKind::WinStayLoseShift)
//!     .build();
//! ```

pub mod config;
pub mod container;

pub use config::MatchConfig;
pub use container::{App, AppBuilder};
