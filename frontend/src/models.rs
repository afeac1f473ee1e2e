//! In-memory fixtures for `--features mock` builds.

use serde_json::json;
use trendboard_shared::{
    catalog::OptionCatalog,
    model::{Category, Department, Subcategory, Trend},
    users::User,
};

/// Sample trends covering every field the dashboard renders.
pub fn mock_trends() -> Vec<Trend> {
    serde_json::from_value(json!([
        {
            "id": 1,
            "title": "Generative AI in lesson preparation",
            "category": "Technology",
            "sub_category": "Artificial Intelligence",
            "department_name": "ICT",
            "time_horizon": "short",
            "scope": "national",
            "impact_score": 8.5,
            "status": "draft",
            "descriptions": {
                "internal_teacher": "Teachers draft assignments with AI tools. Review of generated material becomes part of the job.",
                "internal_business": "Course development time drops. Quality assurance needs new checks.",
                "external_user": "Learners meet AI-made material in every course."
            },
            "werkvloer_voorbeeld": "A teacher generates three versions of a case study in one afternoon.",
            "gevolgen_werk": "Less time spent writing, more time spent reviewing.",
            "gevolgen_skills": ["Prompt engineering", "Critical reading"],
            "regionale_vertaling": "Regional colleges share a prompt library.",
            "llo_kansen": ["Short course on AI literacy"],
            "cijfers": {"adoption_rate": "42%", "schools_surveyed": 120},
            "bronnen": [
                {"organization": "Kennisnet", "year": "2024", "url": "https://www.kennisnet.nl"},
                {"organization": "CBS", "year": "2023"}
            ]
        },
        {
            "id": 2,
            "title": "Robotics on the warehouse floor",
            "category": "Technology",
            "sub_category": "Automation",
            "department_name": "Logistics",
            "time_horizon": "medium",
            "scope": "regional",
            "impact_score": 6,
            "status": "confirmed",
            "description": "Warehouses deploy collaborative robots for order picking.",
            "gevolgen_skills": ["Robot supervision", "Maintenance", "Safety"],
            "cijfers": [
                {"figure": "30% of warehouses use cobots", "source": "TNO", "year": "2023"}
            ],
            "bronnen": ["https://www.tno.nl/robotics"]
        },
        {
            "id": 3,
            "title": "Predictive maintenance with sensor data",
            "category": "Technology",
            "sub_category": "Automation",
            "department_name": "Engineering",
            "time_horizon": "short",
            "scope": "international",
            "impact_score": 7,
            "status": "draft",
            "description": "Machines report wear before they fail.",
            "gevolgen_skills": ["Data interpretation"]
        },
        {
            "id": 4,
            "title": "Heat pumps replace gas boilers",
            "category": "Sustainability",
            "sub_category": ["Energy transition", "Installation"],
            "department_name": "Engineering",
            "time_horizon": "medium",
            "scope": "national",
            "impact_score": 9,
            "status": "confirmed",
            "description": "Installers retrain for heat pump systems. Demand outpaces supply.",
            "gevolgen_skills": ["Heat pump installation"],
            "cijfers": "Around 200,000 heat pumps were installed last year.",
            "bronnen": [{"organization": "RVO"}]
        },
        {
            "id": 5,
            "title": "Circular construction materials",
            "category": "Sustainability",
            "sub_category": "Circular economy",
            "department_name": "Construction",
            "time_horizon": "long",
            "scope": "regional",
            "impact_score": 5,
            "status": "draft",
            "description": "Builders reuse components from demolished buildings."
        },
        {
            "id": 6,
            "title": "Ageing workforce in healthcare",
            "category": "Society",
            "sub_category": "Demographics",
            "department_name": "Care",
            "time_horizon": "long",
            "scope": "national",
            "impact_score": 8,
            "status": "confirmed",
            "description": "A large share of nurses retires within ten years.",
            "gevolgen_skills": ["Mentoring"]
        },
        {
            "id": 7,
            "title": "Remote care monitoring",
            "category": "Society",
            "sub_category": "Digital care",
            "department_name": "Care",
            "time_horizon": "short",
            "scope": "local",
            "impact_score": 3.5,
            "status": "draft",
            "description": "Patients are monitored at home through wearables."
        },
        {
            "id": 8,
            "title": "Hybrid work schedules",
            "category": " ",
            "department_name": "Business",
            "time_horizon": "short",
            "scope": "international",
            "impact_score": 4,
            "status": "confirmed",
            "description": "Offices plan around fewer fixed desks."
        }
    ]))
    .unwrap_or_default()
}

/// Catalog matching [`mock_trends`].
pub fn mock_catalog() -> OptionCatalog {
    let departments = ["ICT", "Logistics", "Engineering", "Construction", "Care", "Business"]
        .iter()
        .zip(1_i64..)
        .map(|(name, id)| Department {
            id,
            name: name.to_string(),
        })
        .collect();
    let categories = [
        ("Technology", "ICT"),
        ("Technology", "Logistics"),
        ("Technology", "Engineering"),
        ("Sustainability", "Engineering"),
        ("Sustainability", "Construction"),
        ("Society", "Care"),
    ]
    .iter()
    .zip(1_i64..)
    .map(|((name, department), id)| Category {
        id,
        category_name: name.to_string(),
        department: Some(department.to_string()),
    })
    .collect();
    let subcategories = [
        ("Artificial Intelligence", "Technology"),
        ("Automation", "Technology"),
        ("Energy transition", "Sustainability"),
        ("Installation", "Sustainability"),
        ("Circular economy", "Sustainability"),
        ("Demographics", "Society"),
        ("Digital care", "Society"),
    ]
    .iter()
    .zip(1_i64..)
    .map(|((name, category), id)| Subcategory {
        id,
        sub_category_name: name.to_string(),
        category_name: Some(category.to_string()),
    })
    .collect();
    OptionCatalog {
        departments,
        categories,
        subcategories,
    }
}

/// Sample accounts.
pub fn mock_users() -> Vec<User> {
    serde_json::from_value(json!([
        {
            "id": "1",
            "email": "admin@example.org",
            "first_name": "Sam",
            "last_name": "Admin",
            "user_type": "admin",
            "is_active": true,
            "created_at": "2024-01-15T09:30:00"
        },
        {
            "id": "2",
            "email": "teacher@example.org",
            "first_name": "Robin",
            "last_name": "de Vries",
            "user_type": "internal_teacher",
            "gender": "Other",
            "is_active": true,
            "created_at": "2024-02-01T12:00:00"
        },
        {
            "id": "3",
            "email": "guest@example.org",
            "first_name": "Alex",
            "last_name": "Jansen",
            "user_type": "external_user",
            "is_active": false,
            "created_at": "2024-03-10T08:15:00"
        }
    ]))
    .unwrap_or_default()
}
