//! Quote monitor configuration
//!
//! Settings loading, environment overrides, endpoint generation and startup
//! logging.

pub mod configurable_value;
pub mod loader;
pub mod settings;
pub mod startup_logger;

pub use configurable_value::{ConfigurableValue, ConfigurableValueError, ValueType};
pub use loader::{load_config, load_config_from, DEFAULT_CONFIG_PATH};
pub use settings::{
	ConfigValidationError, HttpSettings, LogFormat, LoggingSettings, NotificationSettings,
	SchedulerSettings, ServerSettings, Settings, SolverSettings, SwapPairSettings,
};
pub use startup_logger::{
	log_monitor_plan, log_service_info, log_service_shutdown, log_startup_complete,
};
