use crate::events::EventKind;

pub const ERC20_EVENTS: &[EventKind] = &[EventKind::new(
	"Transfer",
	"event Transfer(address from, address to, uint256 value)",
	"erc20Transfer",
)];

pub const ERC1155_EVENTS: &[EventKind] = &[EventKind::new(
	"TransferSingle",
	"event TransferSingle(address operator, address from, address to, uint256 id, uint256 value)",
	"erc1155TransferSingle",
)];
