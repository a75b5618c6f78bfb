use ethers::types::Address;

pub fn sub_display_format(log_target: &str) -> String {
	format!("{:<019}", log_target)
}

/// Joins the given segments into a `/` separated document path.
pub fn document_path(segments: &[&str]) -> String {
	segments
		.iter()
		.map(|segment| segment.trim_matches('/'))
		.filter(|segment| !segment.is_empty())
		.collect::<Vec<_>>()
		.join("/")
}

/// Lowercase `0x` prefixed hex representation of an address.
pub fn address_key(address: &Address) -> String {
	format!("{:?}", address)
}
