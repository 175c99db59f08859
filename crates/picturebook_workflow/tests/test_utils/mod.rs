//! Test utilities for workflow tests.
//!
//! Scripted text, image and speech oracles plus failing store doubles.

#![allow(dead_code)]

pub mod mock_drivers;
pub mod mock_stores;

#[allow(unused_imports)]
pub use mock_drivers::{MockBehavior, MockImageGenerator, MockReply, MockSpeechGenerator, MockTextDriver, RendezvousGenerator, Stage};
#[allow(unused_imports)]
pub use mock_stores::{FailingMediaStorage, FailingStoryRepository, UnavailableStoryRepository};
