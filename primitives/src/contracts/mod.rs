mod collectible;
mod draft;
mod nil;
mod registry;
mod ring;
mod tokens;

pub use collectible::*;
pub use draft::*;
pub use nil::*;
pub use registry::*;
pub use ring::*;
pub use tokens::*;

use crate::binding::{BindingSpec, ConfigLayout};

const REGISTRY: &str = "registry";
const COLLECTIBLE: &str = "collectible";
const RING: &str = "ring";
const NIL: &str = "nil";

const fn shared(
	name: &'static str,
	document: &'static str,
	address_field: &'static str,
	events: &'static [crate::events::EventKind],
) -> BindingSpec {
	BindingSpec { name, layout: ConfigLayout::Shared { document, address_field }, events }
}

/// Every contract binding relayed by the service.
pub const BINDINGS: &[BindingSpec] = &[
	shared("athlete-registry", REGISTRY, "athlete", ATHLETE_REGISTRY_EVENTS),
	shared("college-registry", REGISTRY, "college", COLLEGE_REGISTRY_EVENTS),
	shared("high-school-registry", REGISTRY, "highSchool", HIGH_SCHOOL_REGISTRY_EVENTS),
	shared("pro-registry", REGISTRY, "pro", PRO_REGISTRY_EVENTS),
	shared("directory", REGISTRY, "directory", DIRECTORY_EVENTS),
	BindingSpec {
		name: "athlete-payment-manager",
		layout: ConfigLayout::Dedicated { document: "pollers/contracts/athletePaymentManager" },
		events: ATHLETE_PAYMENT_MANAGER_EVENTS,
	},
	shared(
		"draft-controller-football",
		COLLECTIBLE,
		"draftControllerFootball",
		DRAFT_CONTROLLER_EVENTS,
	),
	shared(
		"draft-controller-basketball",
		COLLECTIBLE,
		"draftControllerBasketball",
		DRAFT_CONTROLLER_EVENTS,
	),
	shared("draft-pick-nfts-football", COLLECTIBLE, "draftPickNFTsFootball", DRAFT_PICK_NFT_EVENTS),
	shared(
		"draft-pick-nfts-basketball",
		COLLECTIBLE,
		"draftPickNFTsBasketball",
		DRAFT_PICK_NFT_EVENTS,
	),
	shared(
		"collectible-series-nfts",
		COLLECTIBLE,
		"collectibleSeriesNfts",
		COLLECTIBLE_SERIES_NFT_EVENTS,
	),
	shared(
		"collectible-series-faucet",
		COLLECTIBLE,
		"collectibleFaucet",
		COLLECTIBLE_SERIES_FAUCET_EVENTS,
	),
	shared("college-burn-auction", COLLECTIBLE, "burnAuction", COLLEGE_BURN_AUCTION_EVENTS),
	shared("college-ring-series", RING, "college", COLLEGE_RING_SERIES_EVENTS),
	shared("ring-series-manager", RING, "manager", RING_SERIES_MANAGER_EVENTS),
	shared("nil-coin-faucet", NIL, "nilCoinFaucet", NIL_COIN_FAUCET_EVENTS),
	shared("lp-manager", NIL, "lpManager", LP_MANAGER_EVENTS),
	shared("team-staking-current", NIL, "teamStakingCurrent", TEAM_STAKING_EVENTS),
	shared("team-staking-previous", NIL, "teamStakingPrevious", TEAM_STAKING_EVENTS),
	shared("natty-staking-current", NIL, "nattyStakingCurrent", TEAM_STAKING_EVENTS),
	shared("natty-staking-previous", NIL, "nattyStakingPrevious", TEAM_STAKING_EVENTS),
	BindingSpec {
		name: "erc20",
		layout: ConfigLayout::Collection { document: "erc20" },
		events: ERC20_EVENTS,
	},
	BindingSpec {
		name: "erc1155",
		layout: ConfigLayout::Collection { document: "erc1155" },
		events: ERC1155_EVENTS,
	},
];

/// Returns the binding registered under the given name.
pub fn find_binding(name: &str) -> Option<&'static BindingSpec> {
	BINDINGS.iter().find(|binding| binding.name == name)
}
