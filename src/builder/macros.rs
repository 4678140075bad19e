//! Macros for ergonomic configuration construction.

/// Build a validated [`MachineConfig`](crate::core::MachineConfig) from a literal table.
///
/// Expands to a [`MachineConfigBuilder`](crate::builder::MachineConfigBuilder)
/// chain and evaluates to `Result<MachineConfig, ConfigError>`.
///
/// # Example
///
/// ```
/// use rewind::machine_config;
///
/// let config = machine_config! {
///     initial: "idle",
///     states: {
///         "idle" => { "start" => "running" },
///         "running" => { "stop" => "idle", "pause" => "paused" },
///         "paused" => { "resume" => "running" },
///     }
/// }
/// .unwrap();
///
/// assert_eq!(config.states.len(), 3);
/// ```
#[macro_export]
macro_rules! machine_config {
    (
        initial: $initial:expr,
        states: {
            $(
                $state:expr => { $( $event:expr => $target:expr ),* $(,)? }
            ),* $(,)?
        } $(,)?
    ) => {
        $crate::builder::MachineConfigBuilder::new()
            .initial($initial)
            $(
                .state(
                    $state,
                    $crate::builder::StateBuilder::new() $( .on($event, $target) )*
                )
            )*
            .build()
    };
}
