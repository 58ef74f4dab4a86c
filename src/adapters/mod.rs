//! Adapters - concrete implementations of the hexagonal port traits.
//!
//! | Adapter        | Implements      | Connects to                  |
//! |----------------|-----------------|------------------------------|
//! | `classifier`   | ImageClassifier | Scripted confidence scores   |
//! | `log_sink`     | StatusObserver  | `log` facade                 |
//! | `memory_store` | SecurityStore   | In-memory collections        |

pub mod classifier;
pub mod log_sink;
pub mod memory_store;
