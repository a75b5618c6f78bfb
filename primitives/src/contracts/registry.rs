use crate::events::EventKind;

pub const ATHLETE_REGISTRY_EVENTS: &[EventKind] = &[
	EventKind::new(
		"ActiveYearAdded",
		"event ActiveYearAdded(uint256 _athleteId, uint16 _year)",
		"athleteActiveYearAdded",
	),
	EventKind::new(
		"IsSignedChanged",
		"event IsSignedChanged(uint256 _athleteId, bool _isSigned)",
		"athleteIsSignedChanged",
	),
	EventKind::new(
		"AthleteAdded",
		"event AthleteAdded(uint256 _athleteId, bool _isFootball, string _displayName, string _lastName, string _middleName, string _firstName)",
		"athleteAdded",
	),
	EventKind::new(
		"AthleteNameChanged",
		"event AthleteNameChanged(uint256 _athleteId, string _displayName, string _lastName, string _middleName, string _firstName)",
		"athleteNameChanged",
	),
	EventKind::new(
		"AthleteCollegeChanged",
		"event AthleteCollegeChanged(uint256 _athleteId, uint256 _collegeId, uint256 _jerseyNumber, string _position)",
		"athleteCollegeChanged",
	),
	EventKind::new(
		"AthleteHighSchoolChanged",
		"event AthleteHighSchoolChanged(uint256 _athleteId, uint256 _highSchoolId, uint256 _jerseyNumber, string _position, uint16 _year)",
		"athleteHighSchoolChanged",
	),
	EventKind::new(
		"AthleteProTeamChanged",
		"event AthleteProTeamChanged(uint256 _athleteId, uint256 _proTeamId, uint256 _jerseyNumber, string _position)",
		"athleteProTeamChanged",
	),
];

pub const COLLEGE_REGISTRY_EVENTS: &[EventKind] = &[
	EventKind::new(
		"CollegeAdded",
		"event CollegeAdded(uint256 _collegeId, string _name, string _conference, string _mascot, uint16 _tier, uint16 _royalty)",
		"collegeAdded",
	),
	EventKind::new(
		"CollegeChanged",
		"event CollegeChanged(uint256 _collegeId, string _name, string _conference, string _mascot, uint16 _royalty)",
		"collegeChanged",
	),
	EventKind::new(
		"TierChanged",
		"event TierChanged(uint256 _collegeId, uint256 _tier)",
		"collegeTierChanged",
	),
];

pub const HIGH_SCHOOL_REGISTRY_EVENTS: &[EventKind] = &[
	EventKind::new(
		"NewHighSchoolAdded",
		"event NewHighSchoolAdded(uint256 indexed _highSchoolId, string _name, string _state, string _city, string _mascot)",
		"highSchoolAdded",
	),
	EventKind::new(
		"HighSchoolChanged",
		"event HighSchoolChanged(uint256 indexed _highSchoolId, string _name, string _state, string _city, string _mascot)",
		"highSchoolChanged",
	),
];

pub const PRO_REGISTRY_EVENTS: &[EventKind] = &[
	EventKind::new(
		"TeamAdded",
		"event TeamAdded(uint256 _teamId, string _name, string _mascot, string _conference, bool _isFootball)",
		"proTeamAdded",
	),
	EventKind::new(
		"TeamChanged",
		"event TeamChanged(uint256 _teamId, string _name, string _mascot, string _conference, bool _isFootball)",
		"proTeamChanged",
	),
];

/// The directory announces newly deployed protocol contracts. Token contracts it announces
/// are registered for block polling.
pub const DIRECTORY_EVENTS: &[EventKind] = &[
	EventKind::new(
		"DraftControllerAdded",
		"event DraftControllerAdded(uint16 _year, address _address, bool _isFootball)",
		"draftControllerAdded",
	),
	EventKind::new(
		"RingSeriesTokenContractAdded",
		"event RingSeriesTokenContractAdded(uint16 _year, address _address)",
		"ringSeriesTokenContractAdded",
	)
	.with_cross_reference("_address"),
	EventKind::new(
		"CollectibleSeriesFaucetContractAdded",
		"event CollectibleSeriesFaucetContractAdded(uint16 _year, address _address, bool _isFootball)",
		"collectibleSeriesFaucetContractAdded",
	),
	EventKind::new(
		"CollectibleSeriesTokenContractAdded",
		"event CollectibleSeriesTokenContractAdded(uint16 _year, address _address)",
		"collectibleSeriesTokenContractAdded",
	)
	.with_cross_reference("_address"),
];

pub const ATHLETE_PAYMENT_MANAGER_EVENTS: &[EventKind] = &[
	EventKind::new(
		"PaymentReceived",
		"event PaymentReceived(uint256 indexed _paymentId, uint256 indexed _athleteId, address indexed _paymentToken, uint256 _amount, uint256 _balance)",
		"athletePaymentReceived",
	),
	EventKind::new(
		"PaymentDisbursed",
		"event PaymentDisbursed(uint256 indexed _disbursementId, uint256 indexed _athleteId, address indexed _paymentToken, address _disbursementAddress, uint256 _amount)",
		"athletePaymentDisbursed",
	),
];
