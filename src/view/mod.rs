//! Filter/render pipeline for the discovery catalog.
//!
//! Dataset -> [`Card::project`] for every record -> [`is_visible`] under the
//! current [`ViewState`] -> visible count. [`ViewController`] owns the cards
//! and state and reruns the whole pass on every input event.

pub mod card;
pub mod controller;
pub mod escape;
pub mod filter;

pub use card::{Card, CardKeys, QualityTier, contact_summary};
pub use controller::{ViewController, ViewEvent};
pub use escape::html_escape;
pub use filter::{TierToggles, ViewState, is_visible};
