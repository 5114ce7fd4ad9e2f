//! Built-in demo data.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use super::{
    Board, Catalog, CommodityQuote, FundCategory, GmpRecord, IndexQuote, Ipo, IpoStatus,
    MutualFund, PriceBand, Product, ProductCategory, ProductStatus, SubscriptionRecord,
};

fn date(y: i32, m: u32, d: u32) -> Option<NaiveDate> {
    NaiveDate::from_ymd_opt(y, m, d)
}

#[allow(clippy::too_many_arguments)]
fn ipo(
    id: u32,
    name: &str,
    board: Board,
    status: IpoStatus,
    band: (Decimal, Decimal),
    lot_size: u32,
    issue_size: &str,
    window: (Option<NaiveDate>, Option<NaiveDate>, Option<NaiveDate>),
    gmp: Decimal,
) -> Ipo {
    Ipo {
        id,
        name: name.to_string(),
        issue_type: "Book Built".to_string(),
        board,
        status,
        price_band: PriceBand::new(band.0, band.1),
        lot_size,
        issue_size: issue_size.to_string(),
        open_date: window.0,
        close_date: window.1,
        listing_date: window.2,
        gmp,
    }
}

fn ipos() -> Vec<Ipo> {
    use Board::{Mainboard, Sme};
    use IpoStatus::{Listed, Open, Upcoming};

    vec![
        ipo(1, "Aurora Aerospace Ltd", Mainboard, Open, (dec!(118), dec!(124)), 120, "921.81 Cr",
            (date(2025, 12, 3), date(2025, 12, 5), date(2025, 12, 10)), dec!(38)),
        ipo(2, "Bluestone Retail Ltd", Mainboard, Open, (dec!(105), dec!(111)), 135, "5,421 Cr",
            (date(2025, 12, 3), date(2025, 12, 5), date(2025, 12, 10)), dec!(42)),
        ipo(3, "Kanha Stainless Ltd", Sme, Open, (dec!(95), dec!(100)), 1200, "46.28 Cr",
            (date(2025, 12, 4), date(2025, 12, 8), date(2025, 12, 11)), dec!(8)),
        ipo(4, "Vidyut Wires Ltd", Mainboard, Open, (dec!(48), dec!(52)), 288, "300 Cr",
            (date(2025, 11, 28), date(2025, 12, 2), date(2025, 12, 5)), dec!(-2)),
        ipo(5, "Coronet Remedies Ltd", Mainboard, Upcoming, (dec!(1008), dec!(1062)), 14, "655.37 Cr",
            (date(2025, 12, 8), date(2025, 12, 10), date(2025, 12, 15)), dec!(120)),
        ipo(6, "Helio Holidays Ltd", Sme, Upcoming, (dec!(114), dec!(118)), 1200, "11.93 Cr",
            (date(2025, 12, 9), date(2025, 12, 11), None), dec!(0)),
        ipo(7, "Nephra Health Services Ltd", Mainboard, Listed, (dec!(438), dec!(460)), 32, "871.05 Cr",
            (None, None, date(2025, 11, 19)), dec!(15)),
        ipo(8, "Exact Technologies Ltd", Sme, Listed, (dec!(133), dec!(140)), 1000, "37.45 Cr",
            (None, None, date(2025, 11, 21)), dec!(-6)),
    ]
}

fn gmp_records() -> Vec<GmpRecord> {
    let record = |id: u32, name: &str, price: Decimal, gmp: Decimal, change: Decimal| GmpRecord {
        id,
        name: name.to_string(),
        ipo_price: price,
        gmp,
        expected_listing: price + gmp,
        change,
    };

    vec![
        record(1, "Aurora Aerospace", dec!(124), dec!(38), dec!(5.2)),
        record(2, "Bluestone Retail", dec!(111), dec!(42), dec!(12.5)),
        record(3, "Kanha Stainless SME", dec!(100), dec!(8), dec!(-1.5)),
        record(4, "Vidyut Wires", dec!(52), dec!(-2), dec!(-3.8)),
        record(5, "Coronet Remedies", dec!(1062), dec!(120), dec!(0)),
        record(6, "Helio Holidays", dec!(118), dec!(0), dec!(0)),
        record(7, "Nephra Health", dec!(460), dec!(15), dec!(-0.6)),
        record(8, "Zenith Polymers", dec!(210), dec!(24), dec!(2.1)),
    ]
}

fn subscriptions() -> Vec<SubscriptionRecord> {
    let record = |id, name: &str, qib, nii, rii, total| SubscriptionRecord {
        id,
        name: name.to_string(),
        qib,
        nii,
        rii,
        total,
    };

    vec![
        record(1, "Aurora Aerospace Ltd", dec!(78.42), dec!(45.10), dec!(12.06), dec!(52.86)),
        record(2, "Bluestone Retail Ltd", dec!(120.18), dec!(38.55), dec!(19.04), dec!(79.02)),
        record(3, "Kanha Stainless Ltd", dec!(4.12), dec!(16.80), dec!(9.74), dec!(10.31)),
        record(4, "Vidyut Wires Ltd", dec!(1.20), dec!(2.05), dec!(3.12), dec!(2.14)),
        record(5, "Nephra Health Services Ltd", dec!(0.62), dec!(0.41), dec!(0.88), dec!(0.67)),
        record(6, "Exact Technologies Ltd", dec!(22.40), dec!(61.33), dec!(30.12), dec!(35.20)),
    ]
}

fn funds() -> Vec<MutualFund> {
    use FundCategory::{FlexiCap, LargeCap, MidCap, Sectoral, SmallCap};

    let fund = |id, name: &str, house: &str, category, nav, r1, r3, r5, rating, aum: &str| {
        MutualFund {
            id,
            name: name.to_string(),
            fund_house: house.to_string(),
            category,
            nav,
            returns_1y: r1,
            returns_3y: r3,
            returns_5y: r5,
            rating,
            aum: aum.to_string(),
        }
    };

    vec![
        fund(1, "Axis Bluechip Fund", "Axis MF", LargeCap, dec!(58.42), dec!(14.2), dec!(11.8), dec!(13.5), 4, "33,450 Cr"),
        fund(2, "SBI Bluechip Fund", "SBI MF", LargeCap, dec!(89.17), dec!(16.9), dec!(15.1), dec!(16.2), 4, "49,820 Cr"),
        fund(3, "Mirae Asset Large Cap Fund", "Mirae Asset", LargeCap, dec!(112.35), dec!(15.4), dec!(13.2), dec!(15.8), 5, "39,110 Cr"),
        fund(4, "HDFC Mid-Cap Opportunities Fund", "HDFC MF", MidCap, dec!(178.90), dec!(28.6), dec!(26.4), dec!(24.9), 5, "72,610 Cr"),
        fund(5, "Kotak Emerging Equity Fund", "Kotak MF", MidCap, dec!(121.04), dec!(25.3), dec!(22.7), dec!(23.1), 4, "48,230 Cr"),
        fund(6, "Nippon India Small Cap Fund", "Nippon India MF", SmallCap, dec!(168.22), dec!(31.8), dec!(29.5), dec!(33.0), 5, "61,030 Cr"),
        fund(7, "SBI Small Cap Fund", "SBI MF", SmallCap, dec!(172.66), dec!(24.1), dec!(21.6), dec!(27.4), 4, "31,260 Cr"),
        fund(8, "Parag Parikh Flexi Cap Fund", "PPFAS MF", FlexiCap, dec!(84.59), dec!(22.7), dec!(20.3), dec!(24.6), 5, "87,540 Cr"),
        fund(9, "HDFC Flexi Cap Fund", "HDFC MF", FlexiCap, dec!(1912.33), dec!(24.8), dec!(23.9), dec!(21.7), 4, "69,640 Cr"),
        fund(10, "ICICI Prudential Technology Fund", "ICICI Prudential MF", Sectoral, dec!(205.71), dec!(18.2), dec!(12.4), dec!(26.8), 3, "13,890 Cr"),
    ]
}

fn products() -> Vec<Product> {
    let product = |id: &str,
                   name: &str,
                   category,
                   price,
                   min: Option<Decimal>,
                   max: Option<Decimal>,
                   status,
                   annual_rate: Option<Decimal>| Product {
        id: id.to_string(),
        name: name.to_string(),
        category,
        price,
        min_investment: min,
        max_investment: max,
        lot_size: None,
        price_band: None,
        status,
        annual_rate,
    };

    use ProductCategory::{Bond, Etf};
    use ProductStatus::{Available, Closed, Open, Upcoming};

    vec![
        product("sgb-2025-3", "Sovereign Gold Bond 2025-26 Series III", Bond, dec!(7788),
            Some(dec!(7788)), Some(dec!(31152000)), Open, Some(dec!(2.5))),
        product("sgb-2024-4", "Sovereign Gold Bond 2024-25 Series IV", Bond, dec!(6263),
            Some(dec!(6263)), Some(dec!(25052000)), Closed, Some(dec!(2.5))),
        product("ssb-2026-1", "Silver Savings Bond 2026 Series I", Bond, dec!(92.50),
            Some(dec!(925)), Some(dec!(1000000)), Upcoming, Some(dec!(1.75))),
        product("gold-etf", "Gold BeES ETF", Etf, dec!(63.52),
            Some(dec!(500)), Some(dec!(1000000)), Available, None),
        product("silver-etf", "Silver BeES ETF", Etf, dec!(98.14),
            Some(dec!(500)), None, Available, None),
        product("nifty-etf", "Nifty 50 ETF", Etf, dec!(278.35),
            Some(dec!(500)), Some(dec!(10000)), Open, None),
    ]
}

fn commodities() -> Vec<CommodityQuote> {
    let quote = |id: &str, name: &str, expiry: (i32, u32, u32), price, change, pct| CommodityQuote {
        id: id.to_string(),
        name: name.to_string(),
        expiry: NaiveDate::from_ymd_opt(expiry.0, expiry.1, expiry.2).unwrap_or_default(),
        price,
        change,
        change_percent: pct,
    };

    vec![
        quote("crude", "Crude Oil", (2025, 12, 18), dec!(5235.00), dec!(-11.00), dec!(-0.21)),
        quote("gas", "Natural Gas", (2025, 12, 26), dec!(413.00), dec!(-8.70), dec!(-2.06)),
        quote("gold", "Gold", (2026, 2, 5), dec!(129914.00), dec!(-193.00), dec!(-0.15)),
        quote("silver", "Silver", (2026, 3, 5), dec!(189595.00), dec!(1531.00), dec!(0.81)),
    ]
}

fn indices() -> Vec<IndexQuote> {
    let index = |name: &str, value, change, pct| IndexQuote {
        name: name.to_string(),
        value,
        change,
        change_percent: pct,
    };

    vec![
        index("NIFTY 50", dec!(24835.85), dec!(156.30), dec!(0.63)),
        index("SENSEX", dec!(81765.86), dec!(478.24), dec!(0.59)),
        index("NIFTY BANK", dec!(52892.45), dec!(-124.50), dec!(-0.24)),
        index("NIFTY IT", dec!(43256.75), dec!(287.15), dec!(0.67)),
        index("NIFTY MIDCAP", dec!(58924.30), dec!(312.80), dec!(0.53)),
        index("NIFTY SMALLCAP", dec!(18456.20), dec!(-87.45), dec!(-0.47)),
        index("INDIA VIX", dec!(13.24), dec!(-0.42), dec!(-3.08)),
        index("GIFT NIFTY", dec!(24892.50), dec!(98.00), dec!(0.40)),
    ]
}

pub(super) fn catalog() -> Catalog {
    Catalog {
        ipos: ipos(),
        gmp: gmp_records(),
        subscriptions: subscriptions(),
        funds: funds(),
        products: products(),
        commodities: commodities(),
        indices: indices(),
    }
}
