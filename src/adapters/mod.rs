//! Adapters: concrete implementations of the port and `embedded-hal`
//! traits.
//!
//! | Adapter     | Implements          | Connects to              |
//! |-------------|---------------------|--------------------------|
//! | `hardware`  | OutputPin           | ESP32 GPIO               |
//! |             | AnalogInput         | ESP32 ADC1 (one-shot)    |
//! | `log_sink`  | EventSink           | Serial log output        |
//! | `time`      | DelayNs             | ROM busy-wait / FreeRTOS |

pub mod hardware;
pub mod log_sink;
pub mod time;
