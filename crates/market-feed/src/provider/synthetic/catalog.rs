//! Fixed vocabularies the synthetic generator draws from.

use crate::models::Category;

/// Ticker, name and previous close in fen.
pub(super) const STOCKS: [(&str, &str, i64); 10] = [
    ("600519", "贵州茅台", 168_050),
    ("300750", "宁德时代", 18_680),
    ("002594", "比亚迪", 25_630),
    ("601012", "隆基绿能", 1_845),
    ("000858", "五粮液", 12_890),
    ("600036", "招商银行", 3_456),
    ("601318", "中国平安", 4_567),
    ("000333", "美的集团", 6_234),
    ("600276", "恒瑞医药", 4_218),
    ("002475", "立讯精密", 2_892),
];

/// Sector name and its leading stock.
pub(super) const SECTORS: [(&str, &str); 15] = [
    ("新能源汽车", "比亚迪"),
    ("光伏", "隆基绿能"),
    ("半导体", "中芯国际"),
    ("人工智能", "科大讯飞"),
    ("医药生物", "恒瑞医药"),
    ("军工", "中航重机"),
    ("白酒", "贵州茅台"),
    ("锂电池", "宁德时代"),
    ("芯片", "中微公司"),
    ("数字经济", "东方财富"),
    ("储能", "阳光电源"),
    ("机器人", "埃斯顿"),
    ("氢能源", "亿华通"),
    ("消费电子", "立讯精密"),
    ("云计算", "用友网络"),
];

const US_STOCK_TITLES: [&str; 10] = [
    "Apple stock surges on strong iPhone sales projections",
    "Tesla deliveries beat expectations for Q1 2026",
    "Nvidia announces new AI chip breakthrough",
    "Tech sector rally continues as Fed signals rate cuts",
    "Amazon splits stock 20-for-1 amid record profits",
    "Microsoft Azure revenue growth accelerates",
    "Meta unveils new VR headset, stock jumps 8%",
    "Google antitrust case reaches critical phase",
    "AMD gains market share in data center chips",
    "Warren Buffett increases stake in energy sector",
];

const CN_STOCK_TITLES: [&str; 10] = [
    "贵州茅台市值突破3万亿，创历史新高",
    "宁德时代发布新一代电池技术",
    "A股三大指数集体上涨，创业板涨超2%",
    "比亚迪1月销量同比增长超50%",
    "央行宣布降准0.5个百分点",
    "阿里巴巴回港上市获批",
    "腾讯发布Q4财报，净利润超预期",
    "中国平安股价创年内新高",
    "上证指数突破3500点关口",
    "北向资金连续10日净流入",
];

const CRYPTO_TITLES: [&str; 10] = [
    "Bitcoin breaks $70,000 as institutional demand surges",
    "Ethereum upgrade successful, gas fees plummet",
    "SEC approves spot Bitcoin ETF applications",
    "Binance launches zero-fee trading promotion",
    "Solana DeFi TVL reaches all-time high",
    "Crypto market cap surpasses $3 trillion",
    "Stablecoin regulations gain bipartisan support",
    "NFT market shows signs of recovery",
    "Bitcoin mining difficulty hits new record",
    "PayPal expands crypto services to 50 countries",
];

const MACRO_TITLES: [&str; 10] = [
    "Fed holds rates steady, signals two cuts in 2026",
    "US GDP growth beats forecasts at 3.2% annualized",
    "China announces stimulus package to boost consumption",
    "ECB cuts rates by 25bp, euro weakens",
    "US inflation falls to 2.4%, lowest since 2021",
    "Japan raises interest rates for first time in decades",
    "Oil prices surge on OPEC+ production cuts",
    "US unemployment rate drops to 3.6%",
    "Global trade tensions ease as talks progress",
    "IMF raises global growth forecast to 3.5%",
];

/// Headlines for a topical category.
pub(super) fn titles(category: Category) -> &'static [&'static str] {
    match category {
        Category::CnStocks => &CN_STOCK_TITLES,
        Category::Crypto => &CRYPTO_TITLES,
        Category::Macro => &MACRO_TITLES,
        Category::UsStocks | Category::All => &US_STOCK_TITLES,
    }
}

/// Publishers for a topical category.
pub(super) fn publishers(category: Category) -> &'static [&'static str] {
    match category {
        Category::CnStocks => &["财联社", "东方财富", "新浪财经", "证券时报", "第一财经"],
        Category::Crypto => &[
            "CoinDesk",
            "Decrypt",
            "The Block",
            "CoinTelegraph",
            "Crypto Briefing",
        ],
        Category::Macro => &[
            "Reuters",
            "Financial Times",
            "WSJ",
            "The Economist",
            "Fed Reserve",
        ],
        Category::UsStocks | Category::All => &[
            "Bloomberg",
            "CNBC",
            "MarketWatch",
            "Seeking Alpha",
            "The Motley Fool",
        ],
    }
}
