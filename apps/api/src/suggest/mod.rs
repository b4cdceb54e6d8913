//! Job-title suggestions: LLM-backed when configured, otherwise a static
//! keyword → career table.

pub mod handlers;
pub mod prompts;

use std::collections::HashSet;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::llm_client::{CallOptions, LlmClient};
use crate::suggest::prompts::{SUGGEST_PROMPT_TEMPLATE, SUGGEST_SYSTEM};

const SUGGEST_OPTIONS: CallOptions = CallOptions {
    max_tokens: 500,
    temperature: 0.7,
    timeout: Duration::from_secs(5),
};

const MAX_SUGGESTIONS: usize = 8;
const MAX_RELATED: usize = 5;
const MAX_ALTERNATIVES: usize = 5;
/// Related titles taken from one partially matching career family.
const RELATED_PER_FAMILY: usize = 3;

/// Keyword → career family. Scanned in order; every matching family contributes.
const CAREER_MAP: &[(&str, &[&str])] = &[
    // Tech
    ("software", &["Software Engineer", "Software Developer", "Full Stack Developer", "Backend Developer", "Frontend Developer", "Web Developer", "Mobile Developer", "DevOps Engineer"]),
    ("developer", &["Software Developer", "Web Developer", "Full Stack Developer", "Application Developer", "Junior Developer", "Senior Developer", "Lead Developer"]),
    ("engineer", &["Software Engineer", "Data Engineer", "DevOps Engineer", "QA Engineer", "Systems Engineer", "Cloud Engineer", "Machine Learning Engineer"]),
    ("data", &["Data Analyst", "Data Scientist", "Data Engineer", "Business Intelligence Analyst", "Analytics Manager", "Database Administrator"]),
    ("analyst", &["Data Analyst", "Business Analyst", "Financial Analyst", "Systems Analyst", "Research Analyst", "Operations Analyst"]),
    ("product", &["Product Manager", "Product Owner", "Product Designer", "UX Designer", "Project Manager", "Program Manager"]),
    ("design", &["UX Designer", "UI Designer", "Graphic Designer", "Product Designer", "Web Designer", "Visual Designer"]),
    ("manager", &["Project Manager", "Product Manager", "Account Manager", "Operations Manager", "HR Manager", "Marketing Manager"]),
    // Healthcare
    ("nurse", &["Registered Nurse", "Licensed Practical Nurse", "Nurse Practitioner", "Clinical Nurse", "Travel Nurse", "Home Health Aide"]),
    ("medical", &["Medical Assistant", "Medical Technician", "Medical Receptionist", "Phlebotomist", "Lab Technician", "Medical Coder"]),
    ("healthcare", &["Healthcare Administrator", "Medical Assistant", "Patient Care Technician", "Health Coach", "Care Coordinator"]),
    // Business
    ("sales", &["Sales Representative", "Account Executive", "Sales Manager", "Business Development", "Inside Sales", "Retail Sales Associate"]),
    ("marketing", &["Marketing Manager", "Digital Marketing", "Content Marketing", "Social Media Manager", "SEO Specialist", "Marketing Coordinator"]),
    ("finance", &["Financial Analyst", "Accountant", "Bookkeeper", "Financial Advisor", "Tax Preparer", "Auditor"]),
    ("accounting", &["Accountant", "Bookkeeper", "Tax Accountant", "Staff Accountant", "Accounts Payable", "Accounts Receivable"]),
    ("hr", &["HR Manager", "HR Coordinator", "Recruiter", "Talent Acquisition", "HR Generalist", "Payroll Specialist"]),
    ("admin", &["Administrative Assistant", "Office Manager", "Executive Assistant", "Receptionist", "Office Coordinator", "Data Entry"]),
    // Service / retail
    ("customer", &["Customer Service Rep", "Customer Success Manager", "Call Center Agent", "Client Relations", "Help Desk Support"]),
    ("retail", &["Retail Sales Associate", "Store Manager", "Cashier", "Merchandiser", "Stock Associate", "Assistant Manager"]),
    ("food", &["Server", "Cook", "Chef", "Kitchen Manager", "Bartender", "Food Service Worker", "Restaurant Manager"]),
    ("warehouse", &["Warehouse Associate", "Forklift Operator", "Shipping/Receiving", "Inventory Specialist", "Logistics Coordinator"]),
    ("driver", &["Delivery Driver", "CDL Driver", "Truck Driver", "Courier", "Route Driver", "Transport Driver"]),
    // Skilled trades
    ("electrician", &["Electrician", "Electrical Apprentice", "Maintenance Electrician", "Industrial Electrician"]),
    ("mechanic", &["Auto Mechanic", "Diesel Mechanic", "Maintenance Technician", "HVAC Technician"]),
    ("construction", &["Construction Worker", "Carpenter", "Plumber", "Welder", "General Laborer", "Superintendent"]),
];

/// Career pivots by query family; the first family with a matching keyword wins.
const ALTERNATIVES: &[(&[&str], &[&str])] = &[
    (&["tech", "software", "developer", "engineer"], &["Product Manager", "Data Analyst", "UX Designer", "Technical Writer", "IT Support"]),
    (&["nurse", "medical", "health"], &["Medical Assistant", "Health Coach", "Pharmacy Tech", "Medical Coder", "Healthcare Admin"]),
    (&["sales", "marketing"], &["Customer Success", "Account Manager", "Business Development", "Event Coordinator"]),
    (&["admin", "office"], &["Project Coordinator", "HR Assistant", "Bookkeeper", "Office Manager"]),
];
const DEFAULT_ALTERNATIVES: &[&str] = &["Project Manager", "Customer Service", "Data Entry", "Sales Associate"];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobSuggestions {
    #[serde(default)]
    pub suggestions: Vec<String>,
    #[serde(default)]
    pub related: Vec<String>,
    #[serde(default)]
    pub alternatives: Vec<String>,
    #[serde(default)]
    pub tip: String,
    #[serde(default)]
    pub ai_powered: bool,
}

/// Suggestions for `query`, preferring the LLM and falling back to the table.
pub async fn suggest_jobs(llm: Option<&LlmClient>, query: &str) -> JobSuggestions {
    let query = query.trim();
    if query.is_empty() {
        return starter_suggestions();
    }

    if let Some(llm) = llm {
        let prompt = SUGGEST_PROMPT_TEMPLATE.replace("{query}", query);
        match llm
            .call_json::<JobSuggestions>(SUGGEST_SYSTEM, &prompt, SUGGEST_OPTIONS)
            .await
        {
            Ok(mut suggestions) => {
                suggestions.ai_powered = true;
                return suggestions;
            }
            Err(e) => warn!("Job suggestion generation failed, using career map: {e}"),
        }
    }

    static_suggestions(query)
}

fn to_strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

fn starter_suggestions() -> JobSuggestions {
    JobSuggestions {
        suggestions: to_strings(&[
            "Software Developer",
            "Data Analyst",
            "Project Manager",
            "Sales Representative",
            "Administrative Assistant",
        ]),
        related: to_strings(&["Customer Service", "Marketing", "Healthcare", "Finance", "Retail"]),
        alternatives: Vec::new(),
        tip: "Enter a job title or skill to get AI-powered suggestions".to_string(),
        ai_powered: false,
    }
}

/// Keyword-table suggestions. A family whose keyword overlaps the query adds
/// all its titles; otherwise titles containing the query become suggestions
/// and a few of the rest become related roles.
fn static_suggestions(query: &str) -> JobSuggestions {
    let q = query.to_lowercase();
    let mut suggestions: Vec<&str> = Vec::new();
    let mut related: Vec<&str> = Vec::new();

    for (keyword, titles) in CAREER_MAP {
        if q.contains(keyword) || keyword.contains(q.as_str()) {
            suggestions.extend(titles.iter());
        } else if titles.iter().any(|t| t.to_lowercase().contains(&q)) {
            let (matching, rest): (Vec<&str>, Vec<&str>) = titles
                .iter()
                .partition(|t| t.to_lowercase().contains(&q));
            suggestions.extend(matching);
            related.extend(rest.into_iter().take(RELATED_PER_FAMILY));
        }
    }

    let alternatives = ALTERNATIVES
        .iter()
        .find(|(keys, _)| keys.iter().any(|k| q.contains(k)))
        .map(|(_, alts)| *alts)
        .unwrap_or(DEFAULT_ALTERNATIVES);

    let mut seen = HashSet::new();
    let suggestions = suggestions
        .into_iter()
        .filter(|s| seen.insert(s.to_lowercase()))
        .take(MAX_SUGGESTIONS)
        .map(String::from)
        .collect();

    let mut seen = HashSet::new();
    let related = related
        .into_iter()
        .filter(|s| seen.insert(*s))
        .take(MAX_RELATED)
        .map(String::from)
        .collect();

    JobSuggestions {
        suggestions,
        related,
        alternatives: to_strings(&alternatives[..alternatives.len().min(MAX_ALTERNATIVES)]),
        tip: format!("Showing jobs related to '{query}'. Add GROQ_API_KEY for AI suggestions!"),
        ai_powered: false,
    }
}
