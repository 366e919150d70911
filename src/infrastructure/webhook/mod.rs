mod http_result_notifier;

pub use http_result_notifier::HttpResultNotifier;
