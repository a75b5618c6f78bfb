use crate::events::EventKind;

pub const NIL_COIN_FAUCET_EVENTS: &[EventKind] = &[
	EventKind::new(
		"FaucetTargetPrice",
		"event FaucetTargetPrice(uint256 _price)",
		"nilFaucetTargetPrice",
	),
	EventKind::new(
		"TokenFaucetSale",
		"event TokenFaucetSale(uint256 _saleId, address _buyer, uint256 _qty, uint256 _totalCost)",
		"tokenFaucetSale",
	),
];

pub const LP_MANAGER_EVENTS: &[EventKind] = &[EventKind::new(
	"NilAddLiquidityProcedure",
	"event NilAddLiquidityProcedure(uint256 _id, uint256 _stableLpAmount, uint256 _nilAmountBurned)",
	"nilLiquidityProcedure",
)];

/// Shared by the team and natty staking contracts of the current and previous year.
pub const TEAM_STAKING_EVENTS: &[EventKind] = &[
	EventKind::new(
		"StakeAdded",
		"event StakeAdded(uint256 indexed _stakeId, address indexed _staker, uint256 indexed _collegeId, uint256 _amount, uint16 _year, bool _isNatty, bool _increase)",
		"teamStakeAdded",
	),
	EventKind::new(
		"StakeClaimed",
		"event StakeClaimed(uint256 indexed _stakeId, address indexed _staker, uint256 indexed _collegeId, uint256 _amount, uint16 _year, bool _isNatty)",
		"teamStakeClaimed",
	),
	EventKind::new(
		"StakingTimeSet",
		"event StakingTimeSet(uint256 _stakingOpens, uint256 _stakingCloses, uint256 _claimableTs, uint16 _year, bool _isNatty)",
		"teamStakeTimeSet",
	),
];
