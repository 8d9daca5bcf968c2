// SPDX-License-Identifier: MIT
//
// lumo-core — the studio core for lumo.
//
// Everything the front end manipulates lives here, with no terminal
// dependencies anywhere in the crate:
//
//   gradient.rs  → the Gradient value record and its CSS forms
//   name.rs      → adjective + noun display names
//   factory.rs   → randomized gradient generation
//   history.rs   → bounded back/forward navigation over set snapshots
//   favorites.rs → the deduplicated favorites collection
//   theme.rs     → UI accent themes (sunset / ocean / neon)
//   store.rs     → the persisted JSON state file
//   session.rs   → the facade wiring all of the above together
//
// The session is handed to the presentation layer by reference —
// explicit dependency injection, no ambient globals. All mutation is
// synchronous: one user event runs to completion before the next.

// Cursor arithmetic mixes usize indices with isize navigation steps.
#![allow(clippy::cast_possible_wrap)]
#![allow(clippy::cast_sign_loss)]

pub mod factory;
pub mod favorites;
pub mod gradient;
pub mod history;
pub mod name;
pub mod session;
pub mod store;
pub mod theme;

pub use factory::GradientFactory;
pub use favorites::Favorites;
pub use gradient::{Gradient, GradientKind};
pub use history::{GradientSet, History};
pub use session::{Session, SessionConfig};
pub use store::{PersistedState, StateStore, StoreError};
pub use theme::Theme;
