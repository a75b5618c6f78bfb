use crate::events::EventKind;

pub const DRAFT_CONTROLLER_EVENTS: &[EventKind] = &[
	EventKind::new(
		"DraftPickClaimed",
		"event DraftPickClaimed(address _claimingAddress, uint256 _tokenId, uint256 _draftBidId, uint256 _year, bool _isFootball)",
		"draftPickClaimed",
	),
	EventKind::new(
		"DraftResultsFinalized",
		"event DraftResultsFinalized(bool _resultsFinal, uint256 _year, bool _isFootball)",
		"draftResultsFinalized",
	),
	EventKind::new(
		"DraftTimeSet",
		"event DraftTimeSet(uint256 _startTs, uint256 _endTs, uint256 _year, bool _isFootball)",
		"draftTimeSet",
	),
	EventKind::new(
		"DraftStakeClaimed",
		"event DraftStakeClaimed(uint256 _bidId, uint256 _year, address _claimingAddress, uint256 _amount, bool _isFootball)",
		"draftStakeClaimed",
	),
	EventKind::new(
		"DraftBidPlaced",
		"event DraftBidPlaced(uint256 _bidId, address _bidder, uint256 _duration, uint256 _amount, uint256 _points, uint256 _year, bool _isFootball)",
		"draftBidPlaced",
	),
	EventKind::new(
		"DraftBidIncreased",
		"event DraftBidIncreased(uint256 _bidId, address _bidder, uint256 _duration, uint256 _amountAdded, uint256 _points, uint256 _year, bool _isFootball)",
		"draftBidIncreased",
	),
	EventKind::new(
		"ClaimingRequirementsSet",
		"event ClaimingRequirementsSet(uint256 _tokenId, uint256 _year, bool _isFootball, uint256 _amount)",
		"claimingRequirementsSet",
	),
];

pub const DRAFT_PICK_NFT_EVENTS: &[EventKind] = &[EventKind::new(
	"TokenDataSet",
	"event TokenDataSet(uint256 _tokenId, uint256 _round, uint256 _slot, uint256 _startTs, string _uri, uint16 _year, bool _isFootball)",
	"draftPickTokenDataSet",
)];
