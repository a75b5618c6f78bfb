use crate::events::EventKind;

pub const COLLEGE_RING_SERIES_EVENTS: &[EventKind] = &[EventKind::new(
	"TokenUriSet",
	"event TokenUriSet(uint256 _tokenId, string _uri)",
	"tokenUriSet",
)];

pub const RING_SERIES_MANAGER_EVENTS: &[EventKind] = &[
	EventKind::new(
		"AthleteRingSeriesQtySet",
		"event AthleteRingSeriesQtySet(uint256 _athleteId, uint256 _maxQty, uint256 _athleteQty)",
		"athleteRingSeriesQtySet",
	),
	EventKind::new(
		"AthleteRingSeriesEligibilitySet",
		"event AthleteRingSeriesEligibilitySet(uint256 _athleteId, bool _isEligible)",
		"athleteRingSeriesEligibilitySet",
	),
	EventKind::new(
		"RingSeriesYearAdded",
		"event RingSeriesYearAdded(uint256 _athleteId, uint16 _year)",
		"ringSeriesYearAdded",
	),
];
