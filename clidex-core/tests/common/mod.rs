//! Shared fixtures for clidex-core integration tests.
//!
//! `TestCommand` is a reference-counted in-memory host whose children can be
//! re-linked after construction, which is the only way to express cycles.

#![allow(dead_code, reason = "each test binary uses a different subset")]

use std::cell::RefCell;
use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;
use std::sync::{Arc, Mutex};

use clidex_core::{Children, HostCommand, HostParam, HostValue, NodeId, ParamKind};
use tracing::field::{Field, Visit};
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::Layer;
use tracing_subscriber::layer::Context;

/// Builder for a [`TestCommand`].
#[derive(Default)]
pub struct CommandFixture {
    name: Option<String>,
    summary: Option<String>,
    invocable: Option<bool>,
    hidden: bool,
    unordered: bool,
    params: Vec<TestParam>,
    children: Vec<TestCommand>,
}

impl CommandFixture {
    pub fn named(name: &str) -> Self {
        Self {
            name: Some(name.to_owned()),
            ..Self::default()
        }
    }

    pub fn unnamed() -> Self {
        Self::default()
    }

    pub fn summary(mut self, summary: &str) -> Self {
        self.summary = Some(summary.to_owned());
        self
    }

    pub fn invocable(mut self, invocable: bool) -> Self {
        self.invocable = Some(invocable);
        self
    }

    pub fn hidden(mut self) -> Self {
        self.hidden = true;
        self
    }

    pub fn unordered(mut self) -> Self {
        self.unordered = true;
        self
    }

    pub fn param(mut self, param: TestParam) -> Self {
        self.params.push(param);
        self
    }

    pub fn child(mut self, child: TestCommand) -> Self {
        self.children.push(child);
        self
    }

    pub fn build(self) -> TestCommand {
        TestCommand(Rc::new(CommandData {
            name: self.name,
            summary: self.summary,
            invocable: self.invocable,
            hidden: self.hidden,
            unordered: self.unordered,
            params: self.params,
            children: RefCell::new(self.children),
        }))
    }
}

struct CommandData {
    name: Option<String>,
    summary: Option<String>,
    invocable: Option<bool>,
    hidden: bool,
    unordered: bool,
    params: Vec<TestParam>,
    children: RefCell<Vec<TestCommand>>,
}

/// Cheap handle to an in-memory command node.
#[derive(Clone)]
pub struct TestCommand(Rc<CommandData>);

impl TestCommand {
    /// Appends `child` after construction; used to close cycles.
    pub fn adopt(&self, child: &Self) {
        self.0.children.borrow_mut().push(child.clone());
    }
}

impl HostCommand for TestCommand {
    type Param = TestParam;

    fn id(&self) -> NodeId {
        NodeId::of(&*self.0)
    }

    fn name(&self) -> Option<String> {
        self.0.name.clone()
    }

    fn summary(&self) -> Option<String> {
        self.0.summary.clone()
    }

    fn children(&self) -> Children<Self> {
        let children = self.0.children.borrow().clone();
        if self.0.unordered {
            Children::Unordered(children)
        } else {
            Children::Ordered(children)
        }
    }

    fn params(&self) -> Vec<TestParam> {
        self.0.params.clone()
    }

    fn is_invocable(&self) -> bool {
        self.0
            .invocable
            .unwrap_or_else(|| self.0.children.borrow().is_empty())
    }

    fn is_hidden(&self) -> bool {
        self.0.hidden
    }
}

/// In-memory parameter declaration.
#[derive(Clone, Debug)]
pub struct TestParam {
    kind: ParamKind,
    name: Option<String>,
    flags: Vec<String>,
    help: Option<String>,
    type_name: Option<String>,
    choices: Vec<String>,
    required: bool,
    default: Option<HostValue>,
    flag: bool,
    nargs: usize,
    multiple: bool,
    hidden: bool,
}

impl TestParam {
    fn new(kind: ParamKind, name: Option<&str>) -> Self {
        Self {
            kind,
            name: name.map(str::to_owned),
            flags: Vec::new(),
            help: None,
            type_name: None,
            choices: Vec::new(),
            required: false,
            default: None,
            flag: false,
            nargs: 1,
            multiple: false,
            hidden: false,
        }
    }

    pub fn option(name: &str) -> Self {
        Self {
            flags: vec![format!("--{name}")],
            ..Self::new(ParamKind::Option, Some(name))
        }
    }

    pub fn flag(name: &str) -> Self {
        Self {
            flag: true,
            type_name: Some("bool".to_owned()),
            ..Self::option(name)
        }
    }

    pub fn argument(name: &str) -> Self {
        Self::new(ParamKind::Argument, Some(name))
    }

    pub fn nameless(kind: ParamKind) -> Self {
        Self::new(kind, None)
    }

    pub fn typed(mut self, type_name: &str) -> Self {
        self.type_name = Some(type_name.to_owned());
        self
    }

    pub fn choices(mut self, choices: &[&str]) -> Self {
        self.choices = choices.iter().map(|choice| (*choice).to_owned()).collect();
        self
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn default_value(mut self, value: HostValue) -> Self {
        self.default = Some(value);
        self
    }

    pub fn help(mut self, help: &str) -> Self {
        self.help = Some(help.to_owned());
        self
    }

    pub fn as_flag(mut self) -> Self {
        self.flag = true;
        self
    }

    pub fn nargs(mut self, nargs: usize) -> Self {
        self.nargs = nargs;
        self
    }

    pub fn multiple(mut self) -> Self {
        self.multiple = true;
        self
    }

    pub fn hidden(mut self) -> Self {
        self.hidden = true;
        self
    }
}

impl HostParam for TestParam {
    fn kind(&self) -> ParamKind {
        self.kind
    }

    fn name(&self) -> Option<String> {
        self.name.clone()
    }

    fn flags(&self) -> Vec<String> {
        self.flags.clone()
    }

    fn help(&self) -> Option<String> {
        self.help.clone()
    }

    fn type_name(&self) -> Option<String> {
        self.type_name.clone()
    }

    fn choices(&self) -> Vec<String> {
        self.choices.clone()
    }

    fn is_required(&self) -> bool {
        self.required
    }

    fn default_value(&self) -> Option<HostValue> {
        self.default.clone()
    }

    fn is_flag(&self) -> bool {
        self.flag
    }

    fn nargs(&self) -> usize {
        self.nargs
    }

    fn is_multiple(&self) -> bool {
        self.multiple
    }

    fn is_hidden(&self) -> bool {
        self.hidden
    }
}

/// The `acme` tree: two non-invocable groups and two leaves.
pub fn acme() -> TestCommand {
    let release = CommandFixture::named("release")
        .summary("Roll out a service release.")
        .param(
            TestParam::option("env")
                .typed("string")
                .choices(&["staging", "prod"])
                .default_value(HostValue::Text("staging".to_owned())),
        )
        .param(TestParam::flag("dry-run"))
        .param(TestParam::argument("service").typed("text").required())
        .build();
    let deploy = CommandFixture::named("deploy")
        .summary("Deployment commands.")
        .child(release)
        .build();
    let health = CommandFixture::named("health")
        .summary("Report service health.")
        .param(TestParam::flag("json"))
        .build();
    CommandFixture::named("acme")
        .summary("Acme operations CLI.")
        .child(deploy)
        .child(health)
        .build()
}

/// Text rendering of [`acme`].
pub const ACME_TEXT: &str = "\
catalog_version: 1
root_command: acme
commands: 2

### acme deploy release
summary: Roll out a service release.
usage: acme deploy release [OPTIONS] SERVICE
params:
- option `--env`, type=choice, required=False, default=\"staging\"
- option `--dry-run`, type=boolean, required=False, default=false, is_flag=True
- argument `service`, type=text, required=True, nargs=1, default=null

### acme health
summary: Report service health.
usage: acme health [OPTIONS]
params:
- option `--json`, type=boolean, required=False, default=false, is_flag=True
";

/// Event captured by [`RecordingLayer`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventRecord {
    pub level: Level,
    pub fields: HashMap<String, String>,
}

/// Layer capturing events so tests can assert on emitted diagnostics.
#[derive(Clone, Default)]
pub struct RecordingLayer {
    events: Arc<Mutex<Vec<EventRecord>>>,
}

impl RecordingLayer {
    pub fn events(&self) -> Vec<EventRecord> {
        self.events.lock().expect("lock poisoned").clone()
    }

    pub fn warnings(&self) -> Vec<EventRecord> {
        self.events()
            .into_iter()
            .filter(|event| event.level == Level::WARN)
            .collect()
    }
}

impl<S: Subscriber> Layer<S> for RecordingLayer {
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        let mut fields = HashMap::new();
        event.record(&mut FieldRecorder {
            fields: &mut fields,
        });
        self.events.lock().expect("lock poisoned").push(EventRecord {
            level: *event.metadata().level(),
            fields,
        });
    }
}

struct FieldRecorder<'a> {
    fields: &'a mut HashMap<String, String>,
}

impl Visit for FieldRecorder<'_> {
    fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
        self.fields
            .insert(field.name().to_owned(), format!("{value:?}"));
    }

    fn record_str(&mut self, field: &Field, value: &str) {
        self.fields
            .insert(field.name().to_owned(), value.to_owned());
    }
}
