//! Canonical line-item ordering.
//!
//! Priorities are keyed by concept local name, so `us-gaap:Revenues` and a filer's
//! extension of the same name rank alike. Lower sorts first. Concepts missing from a
//! table rank [`UNRANKED`] and keep their disclosed order behind ranked siblings.

use finstmt_core::{Concept, StatementKind};

/// Priority of concepts without a canonical position.
pub const UNRANKED: u32 = 10_000;

const INCOME_STATEMENT: &[(&str, u32)] = &[
    ("Revenues", 100),
    ("RevenueFromContractWithCustomerExcludingAssessedTax", 100),
    ("RevenueFromContractWithCustomerIncludingAssessedTax", 100),
    ("SalesRevenueNet", 100),
    ("CostOfRevenue", 200),
    ("CostOfGoodsAndServicesSold", 200),
    ("GrossProfit", 300),
    ("OperatingExpenses", 400),
    ("CostsAndExpenses", 400),
    ("OperatingIncomeLoss", 500),
    ("InterestExpense", 600),
    ("InvestmentIncomeInterest", 610),
    ("NonoperatingIncomeExpense", 620),
    ("OtherNonoperatingIncomeExpense", 620),
    ("IncomeLossFromContinuingOperationsBeforeIncomeTaxesExtraordinaryItemsNoncontrollingInterest", 700),
    ("IncomeLossFromContinuingOperationsBeforeIncomeTaxesMinorityInterestAndIncomeLossFromEquityMethodInvestments", 700),
    ("IncomeTaxExpenseBenefit", 800),
    ("IncomeLossFromContinuingOperations", 850),
    ("NetIncomeLoss", 900),
    ("ProfitLoss", 900),
    ("NetIncomeLossAttributableToNoncontrollingInterest", 910),
    ("EarningsPerShareBasic", 1000),
    ("EarningsPerShareDiluted", 1010),
    ("EarningsPerShareBasicAndDiluted", 1010),
    ("WeightedAverageNumberOfSharesOutstandingBasic", 1100),
    ("WeightedAverageNumberOfDilutedSharesOutstanding", 1110),
];

const BALANCE_SHEET: &[(&str, u32)] = &[
    ("CashAndCashEquivalentsAtCarryingValue", 100),
    ("ShortTermInvestments", 110),
    ("MarketableSecuritiesCurrent", 110),
    ("AccountsReceivableNetCurrent", 120),
    ("InventoryNet", 130),
    ("PrepaidExpenseAndOtherAssetsCurrent", 140),
    ("OtherAssetsCurrent", 150),
    ("AssetsCurrent", 190),
    ("MarketableSecuritiesNoncurrent", 200),
    ("PropertyPlantAndEquipmentNet", 210),
    ("OperatingLeaseRightOfUseAsset", 220),
    ("Goodwill", 230),
    ("IntangibleAssetsNetExcludingGoodwill", 240),
    ("OtherAssetsNoncurrent", 280),
    ("AssetsNoncurrent", 290),
    ("Assets", 300),
    ("AccountsPayableCurrent", 400),
    ("AccruedLiabilitiesCurrent", 410),
    ("ContractWithCustomerLiabilityCurrent", 420),
    ("CommercialPaper", 430),
    ("LongTermDebtCurrent", 440),
    ("OtherLiabilitiesCurrent", 450),
    ("LiabilitiesCurrent", 490),
    ("LongTermDebtNoncurrent", 500),
    ("OperatingLeaseLiabilityNoncurrent", 510),
    ("OtherLiabilitiesNoncurrent", 580),
    ("LiabilitiesNoncurrent", 590),
    ("Liabilities", 600),
    ("CommitmentsAndContingencies", 650),
    ("CommonStockValue", 700),
    ("CommonStocksIncludingAdditionalPaidInCapital", 700),
    ("AdditionalPaidInCapital", 710),
    ("RetainedEarningsAccumulatedDeficit", 720),
    ("AccumulatedOtherComprehensiveIncomeLossNetOfTax", 730),
    ("TreasuryStockValue", 740),
    ("StockholdersEquity", 790),
    ("MinorityInterest", 795),
    ("StockholdersEquityIncludingPortionAttributableToNoncontrollingInterest", 798),
    ("LiabilitiesAndStockholdersEquity", 800),
];

const CASH_FLOW: &[(&str, u32)] = &[
    ("NetIncomeLoss", 100),
    ("ProfitLoss", 100),
    ("DepreciationDepletionAndAmortization", 110),
    ("DepreciationAndAmortization", 110),
    ("ShareBasedCompensation", 120),
    ("DeferredIncomeTaxExpenseBenefit", 130),
    ("IncreaseDecreaseInAccountsReceivable", 140),
    ("IncreaseDecreaseInInventories", 150),
    ("IncreaseDecreaseInAccountsPayable", 160),
    ("NetCashProvidedByUsedInOperatingActivities", 200),
    ("PaymentsToAcquirePropertyPlantAndEquipment", 300),
    ("PaymentsToAcquireBusinessesNetOfCashAcquired", 310),
    ("PaymentsToAcquireMarketableSecurities", 320),
    ("ProceedsFromSaleOfMarketableSecurities", 330),
    ("NetCashProvidedByUsedInInvestingActivities", 400),
    ("ProceedsFromIssuanceOfLongTermDebt", 500),
    ("RepaymentsOfLongTermDebt", 510),
    ("PaymentsForRepurchaseOfCommonStock", 520),
    ("PaymentsOfDividends", 530),
    ("NetCashProvidedByUsedInFinancingActivities", 600),
    ("EffectOfExchangeRateOnCashCashEquivalentsRestrictedCashAndRestrictedCashEquivalents", 700),
    ("CashCashEquivalentsRestrictedCashAndRestrictedCashEquivalentsPeriodIncreaseDecreaseIncludingExchangeRateEffect", 800),
    ("CashCashEquivalentsRestrictedCashAndRestrictedCashEquivalents", 900),
];

const EQUITY: &[(&str, u32)] = &[
    ("NetIncomeLoss", 100),
    ("OtherComprehensiveIncomeLossNetOfTax", 200),
    ("StockIssuedDuringPeriodValueNewIssues", 300),
    ("StockIssuedDuringPeriodValueShareBasedCompensation", 310),
    ("AdjustmentsToAdditionalPaidInCapitalSharebasedCompensationRequisiteServicePeriodRecognitionValue", 320),
    ("StockRepurchasedDuringPeriodValue", 400),
    ("DividendsCommonStock", 500),
    ("Dividends", 500),
    ("StockholdersEquity", 900),
];

const COMPREHENSIVE_INCOME: &[(&str, u32)] = &[
    ("NetIncomeLoss", 100),
    ("ProfitLoss", 100),
    ("OtherComprehensiveIncomeForeignCurrencyTransactionAndTranslationAdjustmentNetOfTax", 200),
    ("OtherComprehensiveIncomeUnrealizedGainLossOnDerivativesArisingDuringPeriodNetOfTax", 210),
    ("OtherComprehensiveIncomeUnrealizedHoldingGainLossOnSecuritiesArisingDuringPeriodNetOfTax", 220),
    ("OtherComprehensiveIncomeLossNetOfTax", 300),
    ("ComprehensiveIncomeNetOfTax", 400),
    ("ComprehensiveIncomeNetOfTaxAttributableToNoncontrollingInterest", 410),
];

const fn table(kind: StatementKind) -> &'static [(&'static str, u32)] {
    match kind {
        StatementKind::BalanceSheet => BALANCE_SHEET,
        StatementKind::IncomeStatement => INCOME_STATEMENT,
        StatementKind::CashFlowStatement => CASH_FLOW,
        StatementKind::EquityStatement => EQUITY,
        StatementKind::ComprehensiveIncome => COMPREHENSIVE_INCOME,
    }
}

/// Returns the canonical priority of a concept within a statement kind.
#[must_use]
pub fn priority(kind: StatementKind, concept: &Concept) -> u32 {
    table(kind)
        .iter()
        .find(|(name, _)| *name == concept.name())
        .map_or(UNRANKED, |(_, rank)| *rank)
}
