use crate::events::EventKind;

pub const COLLECTIBLE_SERIES_NFT_EVENTS: &[EventKind] = &[EventKind::new(
	"TokenUriSet",
	"event TokenUriSet(uint256 _tokenId, string _uri)",
	"tokenUriSet",
)];

pub const COLLECTIBLE_SERIES_FAUCET_EVENTS: &[EventKind] = &[
	EventKind::new(
		"AccessCreditsAddress",
		"event AccessCreditsAddress(uint16 _year, bool _isFootball, address _accessCreditsAddress)",
		"accessCreditsAddress",
	),
	EventKind::new(
		"AthletePriceSet",
		"event AthletePriceSet(uint256 _athleteId, uint16 _year, uint256 _price)",
		"athletePriceSet",
	),
	EventKind::new(
		"CollectibleFaucetTimeSet",
		"event CollectibleFaucetTimeSet(uint256 _open, uint256 _freeAgency, uint256 _close, uint16 _year, bool _isFootball)",
		"collectibleFaucetTimeSet",
	),
	EventKind::new(
		"LevelAdded",
		"event LevelAdded(uint256 _level, uint256 _levelEnds, uint256 _qtyAllowed, uint256 _increasePercentage, uint16 _year, bool _isFootball)",
		"faucetLevelAdded",
	),
	EventKind::new(
		"CollectibleFaucetSale",
		"event CollectibleFaucetSale(uint256 _saleId, uint256 _athleteId, address _buyer, uint256 _qty, uint256 _totalCost, uint16 _year, bool _isFootball)",
		"faucetSale",
	),
];

// `RemoveBid` is emitted as well but has no ingestion endpoint.
pub const COLLEGE_BURN_AUCTION_EVENTS: &[EventKind] = &[
	EventKind::new(
		"BurnBidPlaced",
		"event BurnBidPlaced(uint256 _bidId, address _bidder, uint256 _tokenId, uint256 _bidAmount, uint256 _bidCount, uint16 _year, bool _isFootball)",
		"burnBidPlaced",
	),
	EventKind::new(
		"BurnBidIncreased",
		"event BurnBidIncreased(uint256 _bidId, address _bidder, uint256 _tokenId, uint256 _increasedAmount, uint256 _totalBid, uint16 _year, bool _isFootball)",
		"burnBidIncreased",
	),
	EventKind::new(
		"BurnAuctionTimeSet",
		"event BurnAuctionTimeSet(uint16 _year, bool _isFootball, uint256 _start, uint256 _end)",
		"burnAuctionTimeSet",
	),
];
