//! In-memory adapters for exercising the router end to end.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use uuid::Uuid;

use hrm_core::gateways::{InvoiceRenderer, MailTransport, OutgoingMail};
use hrm_core::repositories::{
    EmailTemplateRepository, EmployeeRepository, InvoiceRepository, OrganizationRepository,
    UserRepository,
};
use hrm_core::services::{
    AuthService, EmailTemplateService, EmployeeService, InvoiceDeliveryService, InvoiceService,
    ModuleGate, OrganizationService, UserService,
};
use hrm_core::{
    DomainError, EmailTemplate, Employee, Invoice, InvoiceStatus, Organization, Role,
    SubscriptionPlan, User,
};
use hrm_security::JwtService;
use hrm_shared::{Page, Pagination};

use crate::state::AppState;

pub const JWT_SECRET: &str = "router-test-secret";

fn page_of<T>(mut items: Vec<T>, pagination: Pagination) -> Page<T> {
    let total = items.len() as u64;
    let start = (pagination.offset() as usize).min(items.len());
    let end = (start + pagination.limit() as usize).min(items.len());
    let items = items.drain(start..end).collect();
    Page::new(items, total, pagination)
}

#[derive(Default)]
pub struct MemoryStore {
    pub organizations: Mutex<HashMap<Uuid, Organization>>,
    pub users: Mutex<HashMap<Uuid, User>>,
    pub employees: Mutex<HashMap<Uuid, Employee>>,
    pub invoices: Mutex<HashMap<Uuid, Invoice>>,
    pub templates: Mutex<HashMap<Uuid, EmailTemplate>>,
    pub outbox: Mutex<Vec<OutgoingMail>>,
}

#[async_trait]
impl OrganizationRepository for MemoryStore {
    async fn find_by_id(&self, id: &Uuid) -> Result<Option<Organization>, DomainError> {
        Ok(self.organizations.lock().unwrap().get(id).cloned())
    }

    async fn list(&self, pagination: Pagination) -> Result<Page<Organization>, DomainError> {
        let items = self.organizations.lock().unwrap().values().cloned().collect();
        Ok(page_of(items, pagination))
    }

    async fn create(&self, organization: &Organization) -> Result<Organization, DomainError> {
        self.organizations
            .lock()
            .unwrap()
            .insert(organization.id, organization.clone());
        Ok(organization.clone())
    }

    async fn update(&self, organization: &Organization) -> Result<Organization, DomainError> {
        OrganizationRepository::create(self, organization).await
    }
}

#[async_trait]
impl UserRepository for MemoryStore {
    async fn find_by_id(&self, id: &Uuid) -> Result<Option<User>, DomainError> {
        Ok(self.users.lock().unwrap().get(id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, DomainError> {
        Ok(self
            .users
            .lock()
            .unwrap()
            .values()
            .find(|u| u.email.eq_ignore_ascii_case(email))
            .cloned())
    }

    async fn create(&self, user: &User) -> Result<User, DomainError> {
        self.users.lock().unwrap().insert(user.id, user.clone());
        Ok(user.clone())
    }

    async fn update(&self, user: &User) -> Result<User, DomainError> {
        UserRepository::create(self, user).await
    }
}

#[async_trait]
impl EmployeeRepository for MemoryStore {
    async fn find_by_id(&self, id: &Uuid) -> Result<Option<Employee>, DomainError> {
        Ok(self.employees.lock().unwrap().get(id).cloned())
    }

    async fn find_by_user_id(&self, user_id: &Uuid) -> Result<Option<Employee>, DomainError> {
        Ok(self
            .employees
            .lock()
            .unwrap()
            .values()
            .find(|e| e.user_id == *user_id)
            .cloned())
    }

    async fn count_by_organization(&self, organization_id: &Uuid) -> Result<i64, DomainError> {
        Ok(self
            .employees
            .lock()
            .unwrap()
            .values()
            .filter(|e| e.organization_id == *organization_id)
            .count() as i64)
    }

    async fn list(&self, organization_id: &Uuid, pagination: Pagination) -> Result<Page<Employee>, DomainError> {
        let items = self
            .employees
            .lock()
            .unwrap()
            .values()
            .filter(|e| e.organization_id == *organization_id)
            .cloned()
            .collect();
        Ok(page_of(items, pagination))
    }

    async fn create(&self, employee: &Employee) -> Result<Employee, DomainError> {
        self.employees.lock().unwrap().insert(employee.id, employee.clone());
        Ok(employee.clone())
    }
}

#[async_trait]
impl InvoiceRepository for MemoryStore {
    async fn find_by_id(&self, id: &Uuid) -> Result<Option<Invoice>, DomainError> {
        Ok(self.invoices.lock().unwrap().get(id).cloned())
    }

    async fn list(
        &self,
        organization_id: &Uuid,
        status: Option<InvoiceStatus>,
        pagination: Pagination,
    ) -> Result<Page<Invoice>, DomainError> {
        let items = self
            .invoices
            .lock()
            .unwrap()
            .values()
            .filter(|i| i.organization_id == *organization_id)
            .filter(|i| status.map_or(true, |s| i.status == s))
            .cloned()
            .collect();
        Ok(page_of(items, pagination))
    }

    async fn create(&self, invoice: &Invoice) -> Result<Invoice, DomainError> {
        let mut rows = self.invoices.lock().unwrap();
        if rows
            .values()
            .any(|i| i.organization_id == invoice.organization_id && i.invoice_no == invoice.invoice_no)
        {
            return Err(DomainError::InvoiceNumberAlreadyExists(invoice.invoice_no.clone()));
        }
        rows.insert(invoice.id, invoice.clone());
        Ok(invoice.clone())
    }

    async fn update(&self, invoice: &Invoice) -> Result<Option<Invoice>, DomainError> {
        let mut rows = self.invoices.lock().unwrap();
        match rows.get(&invoice.id) {
            Some(stored) if stored.status != InvoiceStatus::Paid => {
                rows.insert(invoice.id, invoice.clone());
                Ok(Some(invoice.clone()))
            }
            _ => Ok(None),
        }
    }

    async fn delete(&self, id: &Uuid, organization_id: &Uuid) -> Result<bool, DomainError> {
        let mut rows = self.invoices.lock().unwrap();
        match rows.get(id) {
            Some(i) if i.organization_id == *organization_id && i.status != InvoiceStatus::Paid => {
                rows.remove(id);
                Ok(true)
            }
            _ => Ok(false),
        }
    }
}

#[async_trait]
impl EmailTemplateRepository for MemoryStore {
    async fn find_by_id(&self, id: &Uuid) -> Result<Option<EmailTemplate>, DomainError> {
        Ok(self.templates.lock().unwrap().get(id).cloned())
    }

    async fn find_default(&self, organization_id: &Uuid) -> Result<Option<EmailTemplate>, DomainError> {
        Ok(self
            .templates
            .lock()
            .unwrap()
            .values()
            .find(|t| t.organization_id == *organization_id && t.is_default)
            .cloned())
    }

    async fn list(&self, organization_id: &Uuid, pagination: Pagination) -> Result<Page<EmailTemplate>, DomainError> {
        let items = self
            .templates
            .lock()
            .unwrap()
            .values()
            .filter(|t| t.organization_id == *organization_id)
            .cloned()
            .collect();
        Ok(page_of(items, pagination))
    }

    async fn create(&self, template: &EmailTemplate) -> Result<EmailTemplate, DomainError> {
        let mut rows = self.templates.lock().unwrap();
        if template.is_default {
            for other in rows.values_mut() {
                if other.organization_id == template.organization_id {
                    other.is_default = false;
                }
            }
        }
        rows.insert(template.id, template.clone());
        Ok(template.clone())
    }

    async fn update(&self, template: &EmailTemplate) -> Result<EmailTemplate, DomainError> {
        EmailTemplateRepository::create(self, template).await
    }

    async fn delete(&self, id: &Uuid, organization_id: &Uuid) -> Result<bool, DomainError> {
        let mut rows = self.templates.lock().unwrap();
        match rows.get(id) {
            Some(t) if t.organization_id == *organization_id && !t.is_default => {
                rows.remove(id);
                Ok(true)
            }
            _ => Ok(false),
        }
    }
}

#[async_trait]
impl MailTransport for MemoryStore {
    async fn send(&self, mail: OutgoingMail) -> Result<(), DomainError> {
        self.outbox.lock().unwrap().push(mail);
        Ok(())
    }
}

pub struct StubRenderer;

impl InvoiceRenderer for StubRenderer {
    fn render(&self, invoice: &Invoice) -> Result<Vec<u8>, DomainError> {
        Ok(format!("%PDF-1.5 {}", invoice.invoice_no).into_bytes())
    }
}

/// Wires every service over one shared store.
pub fn app_state(store: Arc<MemoryStore>) -> AppState {
    let gate = ModuleGate::new(store.clone());
    let invoices = Arc::new(InvoiceService::new(store.clone(), gate.clone()));
    let templates = Arc::new(EmailTemplateService::new(store.clone(), gate.clone()));

    AppState {
        auth: Arc::new(AuthService::new(store.clone(), jwt())),
        organizations: Arc::new(OrganizationService::new(store.clone())),
        users: Arc::new(UserService::new(store.clone())),
        employees: Arc::new(EmployeeService::new(store.clone(), store.clone(), gate)),
        delivery: Arc::new(InvoiceDeliveryService::new(
            invoices.clone(),
            store.clone(),
            templates.clone(),
            Arc::new(StubRenderer),
            store,
        )),
        invoices,
        templates,
    }
}

pub fn jwt() -> JwtService {
    JwtService::new(JWT_SECRET, 900, 3600)
}

/// Seeds an organization on `plan` and returns its id.
pub fn seed_organization(store: &MemoryStore, plan: SubscriptionPlan) -> Uuid {
    let organization = Organization::new("Acme Corp".to_string(), plan, None).unwrap();
    let id = organization.id;
    store.organizations.lock().unwrap().insert(id, organization);
    id
}

pub fn bearer(role: Role, organization_id: Option<Uuid>) -> String {
    let pair = jwt()
        .generate_pair(&Uuid::new_v4(), role.as_str(), organization_id.as_ref())
        .unwrap();
    format!("Bearer {}", pair.access_token)
}
