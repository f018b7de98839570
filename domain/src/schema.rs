/// The one table the assistant knows about. The database file is expected to
/// pre-exist with exactly this schema; no creation or migration happens here.
pub const TABLE_NAME: &str = "economicdata";

pub const COLUMNS: [&str; 15] = [
    "country_name",
    "year",
    "Inflation (CPI %)",
    "GDP (Current USD)",
    "GDP per Capita (Current USD)",
    "Unemployment Rate (%)",
    "Interest Rate (Real, %)",
    "Inflation (GDP Deflator, %)",
    "GDP Growth (% Annual)",
    "Current Account Balance (% GDP)",
    "Government Expense (% of GDP)",
    "Government Revenue (% of GDP)",
    "Tax Revenue (% of GDP)",
    "Gross National Income (USD)",
    "Public Debt (% of GDP)",
];

/// Instruction text sent ahead of every question. The formatting rules are a
/// contract with the model, not something the pipeline enforces: the reply is
/// still cleaned defensively before use.
pub const SQL_PROMPT: &str = "\
You are an expert in converting English questions to SQL query!
The SQL database has a table called economicdata with the following columns:
[country_name], [year], [Inflation (CPI %)], [GDP (Current USD)], [GDP per Capita (Current USD)],
[Unemployment Rate (%)], [Interest Rate (Real, %)], [Inflation (GDP Deflator, %)], [GDP Growth (% Annual)],
[Current Account Balance (% GDP)], [Government Expense (% of GDP)], [Government Revenue (% of GDP)],
[Tax Revenue (% of GDP)], [Gross National Income (USD)], [Public Debt (% of GDP)]

When writing the SQL query, ensure:
- Column names with spaces are enclosed in square brackets [ ]
- The SQL code should not have ``` in beginning or end
- Do not include the word 'sql' in the output
";
