//! Built-in sample content, served when no content store is configured.

use serde_json::json;

use super::store::MemoryContentStore;

pub fn demo_store() -> MemoryContentStore {
    MemoryContentStore::new()
        .with_collection(
            "brandstorymilestones",
            vec![
                json!({
                    "_id": "ms-cloud",
                    "milestoneTitle": "Cloud-Native Pivot",
                    "narrativeText": "Rebuilt our delivery platform around containers and managed infrastructure.",
                    "year": 2019,
                    "shortSummary": "Every client workload moved to the cloud."
                }),
                json!({
                    "_id": "ms-founded",
                    "milestoneTitle": "Founded",
                    "narrativeText": "Three engineers, one shared office and a commitment to geometric precision.",
                    "year": 2014
                }),
                json!({
                    "_id": "ms-ai",
                    "milestoneTitle": "Applied AI Practice",
                    "narrativeText": "Launched a dedicated team for machine learning products.",
                    "year": 2023,
                    "ctaUrl": "https://staviya.example/ai"
                }),
            ],
        )
        .with_collection(
            "services",
            vec![
                json!({
                    "_id": "svc-web",
                    "serviceName": "Web Platforms",
                    "shortDescription": "High-traffic web applications engineered for scale.",
                    "learnMoreUrl": "https://staviya.example/services/web"
                }),
                json!({
                    "_id": "svc-mobile",
                    "serviceName": "Mobile Engineering",
                    "shortDescription": "Native and cross-platform apps with offline-first sync."
                }),
                json!({
                    "_id": "svc-cloud",
                    "serviceName": "Cloud Architecture",
                    "shortDescription": "Resilient infrastructure, automated from day one.",
                    "learnMoreUrl": "https://staviya.example/services/cloud"
                }),
                json!({
                    "_id": "svc-data",
                    "serviceName": "Data & Analytics",
                    "shortDescription": "Pipelines and dashboards that turn events into decisions."
                }),
                json!({
                    "_id": "svc-security",
                    "serviceName": "Security Audits",
                    "shortDescription": "Threat modelling and hardening for critical systems."
                }),
            ],
        )
        .with_collection(
            "technologies",
            vec![
                json!({"_id": "tech-rust", "technologyName": "Rust", "category": "Systems"}),
                json!({"_id": "tech-ts", "technologyName": "TypeScript", "category": "Frontend"}),
                json!({"_id": "tech-k8s", "technologyName": "Kubernetes", "category": "Infrastructure"}),
                json!({"_id": "tech-pg", "technologyName": "PostgreSQL", "category": "Data"}),
                json!({"_id": "tech-tf", "technologyName": "Terraform"}),
                json!({"_id": "tech-kafka", "technologyName": "Kafka", "category": "Streaming"}),
            ],
        )
        .with_collection(
            "companystats",
            vec![
                json!({"_id": "stat-uptime", "label": "Uptime", "statisticValue": 99.9, "unit": "%", "displayOrder": 3}),
                json!({"_id": "stat-projects", "label": "Projects Delivered", "statisticValue": 150, "unit": "+", "displayOrder": 1}),
                json!({"_id": "stat-clients", "label": "Enterprise Clients", "statisticValue": 40, "unit": "+", "displayOrder": 2}),
                json!({"_id": "stat-years", "label": "Years of Engineering", "statisticValue": 10, "displayOrder": 4}),
            ],
        )
}
