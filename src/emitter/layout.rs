//! Emission-ready forms of structs and functions.
//!
//! Every type token is resolved here, before anything is written, so an
//! unknown type aborts generation without producing partial output.

use std::collections::HashMap;

use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::visit::DfsPostOrder;

use crate::error::Result;
use crate::metadata::{Function, Struct, TypeRef, TypeResolver};
use crate::naming::NameMapper;

/// A resolved struct field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldDesc {
    pub name: String,
    pub ty: TypeRef,
    /// Element count for array fields
    pub size: Option<usize>,
}

impl FieldDesc {
    pub fn new(name: impl Into<String>, ty: TypeRef, size: Option<usize>) -> Self {
        FieldDesc {
            name: name.into(),
            ty,
            size,
        }
    }
}

/// A struct with every member type resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StructLayout {
    pub name: String,
    pub fields: Vec<FieldDesc>,
}

impl StructLayout {
    /// Resolve every member of `s`, keeping member order.
    pub fn resolve(s: &Struct, resolver: &TypeResolver<'_>) -> Result<Self> {
        let fields = s
            .members
            .iter()
            .map(|m| -> Result<FieldDesc> {
                let ty = resolver.resolve(&m.ty, || {
                    format!("struct `{}` member `{}`", s.name, m.name)
                })?;
                Ok(FieldDesc::new(m.name.clone(), ty, m.size))
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(StructLayout {
            name: s.name.clone(),
            fields,
        })
    }

    /// Names of the structs this layout embeds by value.
    pub fn composite_deps(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().filter_map(|f| match &f.ty {
            TypeRef::Composite(name) => Some(name.as_str()),
            _ => None,
        })
    }
}

/// A function with its binding name and resolved signature.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FunctionBinding {
    /// Binding-facing name
    pub name: String,
    /// Native symbol name
    pub native: String,
    pub args: Vec<TypeRef>,
    pub ret: TypeRef,
}

impl FunctionBinding {
    pub fn resolve(f: &Function, names: &NameMapper, resolver: &TypeResolver<'_>) -> Result<Self> {
        let args = f
            .args
            .iter()
            .enumerate()
            .map(|(i, arg)| {
                resolver.resolve(arg, || format!("function `{}` argument {}", f.name, i + 1))
            })
            .collect::<Result<Vec<_>>>()?;
        let ret = resolver.resolve(&f.ret, || format!("function `{}` return type", f.name))?;

        Ok(FunctionBinding {
            name: names.map(&f.name).to_string(),
            native: f.name.clone(),
            args,
            ret,
        })
    }
}

/// Order layouts so every struct comes after the structs it embeds by value.
/// Structs with no ordering constraint between them keep their input order.
pub fn dependency_order(layouts: Vec<StructLayout>) -> Vec<StructLayout> {
    let mut graph: DiGraph<usize, ()> = DiGraph::with_capacity(layouts.len(), 0);
    let nodes: Vec<NodeIndex> = (0..layouts.len()).map(|i| graph.add_node(i)).collect();
    let by_name: HashMap<&str, NodeIndex> = layouts
        .iter()
        .zip(&nodes)
        .map(|(layout, node)| (layout.name.as_str(), *node))
        .collect();

    for (layout, &node) in layouts.iter().zip(&nodes) {
        for dep in layout.composite_deps() {
            match by_name.get(dep) {
                Some(&dep_node) if dep_node != node => {
                    graph.add_edge(node, dep_node, ());
                }
                Some(_) => {}
                None => tracing::warn!(
                    "struct `{}` embeds `{}` by value, but no layout is generated for it",
                    layout.name,
                    dep
                ),
            }
        }
    }

    // Post-order visits dependencies before the structs embedding them.
    let mut order = Vec::with_capacity(layouts.len());
    let mut dfs = DfsPostOrder::empty(&graph);
    for &start in &nodes {
        dfs.move_to(start);
        while let Some(node) = dfs.next(&graph) {
            order.push(graph[node]);
        }
    }

    let mut slots: Vec<Option<StructLayout>> = layouts.into_iter().map(Some).collect();
    order
        .into_iter()
        .filter_map(|i| slots[i].take())
        .collect()
}
