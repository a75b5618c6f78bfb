/// Logs a message under a binding's log target and reports it to Sentry.
///
/// ```ignore
/// log_and_capture!(error, binding_name, SUB_LOG_TARGET,
///     "❗️ Failed to subscribe: {}", err);
///
/// // with the contract address the message refers to
/// log_and_capture!(warn, binding_name, SUB_LOG_TARGET, address,
///     "⚠️ Failed to record delivery error: {}", err);
///
/// // info is only logged
/// log_and_capture!(info, binding_name, SUB_LOG_TARGET, "🔖 Subscribed");
/// ```
#[macro_export]
macro_rules! log_and_capture {
	(error, $target:expr, $sub_target:expr, $address:expr, $fmt:literal $($arg:tt)*) => {{
		$crate::log_and_capture!(@capture error, Error, $target,
			format!("-[{}]-[{}] {}", $crate::utils::sub_display_format($sub_target), $address, format!($fmt $($arg)*)));
	}};

	(error, $target:expr, $sub_target:expr, $fmt:literal $($arg:tt)*) => {{
		$crate::log_and_capture!(@capture error, Error, $target,
			format!("-[{}] {}", $crate::utils::sub_display_format($sub_target), format!($fmt $($arg)*)));
	}};

	(warn, $target:expr, $sub_target:expr, $address:expr, $fmt:literal $($arg:tt)*) => {{
		$crate::log_and_capture!(@capture warn, Warning, $target,
			format!("-[{}]-[{}] {}", $crate::utils::sub_display_format($sub_target), $address, format!($fmt $($arg)*)));
	}};

	(warn, $target:expr, $sub_target:expr, $fmt:literal $($arg:tt)*) => {{
		$crate::log_and_capture!(@capture warn, Warning, $target,
			format!("-[{}] {}", $crate::utils::sub_display_format($sub_target), format!($fmt $($arg)*)));
	}};

	(info, $target:expr, $sub_target:expr, $fmt:literal $($arg:tt)*) => {{
		log::info!(
			target: $target,
			"-[{}] {}",
			$crate::utils::sub_display_format($sub_target),
			format!($fmt $($arg)*)
		);
	}};

	(@capture $level:ident, $sentry_level:ident, $target:expr, $log_msg:expr) => {{
		let log_msg = $log_msg;
		log::$level!(target: $target, "{log_msg}");
		sentry::capture_message(&format!("[{}]{log_msg}", $target), sentry::Level::$sentry_level);
	}};
}
