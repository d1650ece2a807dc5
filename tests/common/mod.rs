//! Shared fixture: a small TypeScript workspace as the parser would hand it
//! over.
//!
//! - `helper.ts` declares one symbol of every kind
//! - `consumer.ts` and `another_consumer.ts` import and use all of them
//! - `clean.ts` is self-contained and diagnostic-free
//! - `main.ts` has a statement after `return`
//!
//! Positions are 0-indexed and match the source lines in the comments.

#![allow(dead_code)]

use xref::syntax::{
    Class, ClassMember, Constant, EnumMember, ExportDecl, Expr, Function, ImportDecl,
    ImportSpecifier, Interface, Item, MemberSignature, ObjectField, Param, Primitive,
    SourceModule, Stmt, TypeExpr, TypeRef,
};
use xref::{AnalysisHost, ModuleId, Span};

pub const SHARED: [&str; 6] = [
    "SharedFunction",
    "SharedInterface",
    "SharedClass",
    "SharedType",
    "SharedConstant",
    "SharedEnum",
];

fn string() -> TypeExpr {
    TypeExpr::Primitive(Primitive::String)
}

fn number() -> TypeExpr {
    TypeExpr::Primitive(Primitive::Number)
}

fn void() -> TypeExpr {
    TypeExpr::Primitive(Primitive::Void)
}

/// `console.log(args...)` on its own line.
pub fn console_log(args: Vec<Expr>, line: u32, col: u32) -> Stmt {
    Stmt::expr(Expr::method_call(Expr::ident("console"), "log", args)).at(line, col)
}

/// `import { SharedFunction, ... } from './helper'`, one name per line
/// starting at line 2.
pub fn import_shared() -> ImportDecl {
    let specifiers = SHARED
        .iter()
        .enumerate()
        .map(|(i, name)| ImportSpecifier::named(*name).at(2 + i as u32, 2))
        .collect();
    ImportDecl::new("./helper", specifiers).at(1, 0)
}

pub fn helper() -> SourceModule {
    // export class SharedClass implements SharedInterface { ... }
    let shared_class = Class::new(vec![
        // private name: string;
        ClassMember::property("name", Some(string()), None).at(15, 2),
        // getName(): string { return this.name; }
        ClassMember::method(
            "getName",
            Function::new(vec![], vec![Stmt::ret(Expr::member(Expr::this(), "name")).at(22, 4)]).returning(string()),
        )
        .at(21, 2),
        // getValue(): number { return 42; }
        ClassMember::method(
            "getValue",
            Function::new(vec![], vec![Stmt::ret(Expr::number(42.0)).at(26, 4)]).returning(number()),
        )
        .at(25, 2),
        // helperMethod(): void { console.log("Helper method called"); }
        ClassMember::method(
            "helperMethod",
            Function::new(vec![], vec![console_log(vec![Expr::string("Helper method called")], 30, 4)])
                .returning(void()),
        )
        .at(29, 2),
    ])
    .implementing(TypeRef::new("SharedInterface").at(14, 36))
    .with_constructor(Function::new(
        vec![Param::new("name").typed(string())],
        vec![Stmt::expr(Expr::assign(Expr::member(Expr::this(), "name"), Expr::ident("name"))).at(18, 4)],
    ));

    SourceModule::new("helper.ts")
        // export function SharedFunction(): string { return "helper function"; }
        .with_item(
            Item::function(
                "SharedFunction",
                Function::new(vec![], vec![Stmt::ret(Expr::string("helper function")).at(4, 2)]).returning(string()),
            )
            .exported()
            .at(3, 0),
        )
        // export interface SharedInterface { getName(): string; getValue(): number; }
        .with_item(
            Item::interface(
                "SharedInterface",
                Interface::new(vec![
                    MemberSignature::method("getName", 0).at(9, 2),
                    MemberSignature::method("getValue", 0).at(10, 2),
                ]),
            )
            .exported()
            .at(8, 0),
        )
        .with_item(Item::class("SharedClass", shared_class).exported().at(14, 0))
        // export type SharedType = string | number;
        .with_item(
            Item::type_alias("SharedType", TypeExpr::Union(vec![string(), number()]))
                .exported()
                .at(35, 0),
        )
        // export const SharedConstant = "SHARED_VALUE";
        .with_item(
            Item::constant("SharedConstant", Constant::new(Expr::string("SHARED_VALUE")))
                .exported()
                .at(38, 0),
        )
        // export enum SharedEnum { ONE, TWO, THREE }
        .with_item(
            Item::enumeration(
                "SharedEnum",
                vec![
                    EnumMember::new("ONE").at(42, 2),
                    EnumMember::new("TWO").at(43, 2),
                    EnumMember::new("THREE").at(44, 2),
                ],
            )
            .exported()
            .at(41, 0),
        )
}

pub fn consumer() -> SourceModule {
    let body = vec![
        // console.log("Consumer calling:", SharedFunction());
        console_log(
            vec![
                Expr::string("Consumer calling:"),
                Expr::call(Expr::ident("SharedFunction").at(12, 35), vec![]),
            ],
            12,
            2,
        ),
        // const instance = new SharedClass("test instance");
        Stmt::local(
            "instance",
            None,
            Some(Expr::construct(Expr::ident("SharedClass").at(15, 23), vec![Expr::string("test instance")])),
        )
        .at(15, 2),
        console_log(vec![Expr::method_call(Expr::ident("instance"), "getName", vec![])], 16, 2),
        Stmt::expr(Expr::method_call(Expr::ident("instance"), "helperMethod", vec![])).at(17, 2),
        // const iface: SharedInterface = instance;
        Stmt::local("iface", Some(TypeExpr::named("SharedInterface")), Some(Expr::ident("instance"))).at(20, 2),
        console_log(vec![Expr::method_call(Expr::ident("iface"), "getName", vec![])], 21, 2),
        console_log(vec![Expr::method_call(Expr::ident("iface"), "getValue", vec![])], 22, 2),
        // const value: SharedType = "string value";
        Stmt::local("value", Some(TypeExpr::named("SharedType")), Some(Expr::string("string value"))).at(25, 2),
        Stmt::local("numValue", Some(TypeExpr::named("SharedType")), Some(Expr::number(42.0))).at(26, 2),
        console_log(vec![Expr::ident("value"), Expr::ident("numValue")], 27, 2),
        console_log(vec![Expr::ident("SharedConstant").at(30, 14)], 30, 2),
        console_log(vec![Expr::member(Expr::ident("SharedEnum"), "ONE").at(33, 14)], 33, 2),
    ];

    SourceModule::new("consumer.ts")
        .with_import(import_shared())
        .with_item(
            Item::function("ConsumerFunction", Function::new(vec![], body).returning(void()))
                .exported()
                .at(11, 0),
        )
        // ConsumerFunction();
        .with_statement(Stmt::expr(Expr::call(Expr::ident("ConsumerFunction").at(37, 0), vec![])).at(37, 0))
}

pub fn another_consumer() -> SourceModule {
    let iface = Expr::object(vec![
        ObjectField::new("getName", Expr::arrow_expr(vec![], Expr::string("custom implementation"))).at(20, 4),
        ObjectField::new("getValue", Expr::arrow_expr(vec![], Expr::number(100.0))).at(21, 4),
    ]);
    let body = vec![
        // const result = SharedFunction();
        Stmt::local("result", None, Some(Expr::call(Expr::ident("SharedFunction").at(12, 17), vec![]))).at(12, 2),
        console_log(vec![Expr::template(vec![Expr::ident("result")])], 13, 2),
        Stmt::local(
            "instance",
            None,
            Some(Expr::construct(Expr::ident("SharedClass"), vec![Expr::string("another instance")])),
        )
        .at(16, 2),
        // const iface: SharedInterface = { getName: ..., getValue: ... };
        Stmt::local("iface", Some(TypeExpr::named("SharedInterface")), Some(iface)).at(19, 2),
        // const mixedArray: SharedType[] = ["string", 42, "another"];
        Stmt::local(
            "mixedArray",
            Some(TypeExpr::array(TypeExpr::named("SharedType"))),
            Some(Expr::array(vec![Expr::string("string"), Expr::number(42.0), Expr::string("another")])),
        )
        .at(25, 2),
        // const prefixed = `PREFIX_${SharedConstant}`;
        Stmt::local("prefixed", None, Some(Expr::template(vec![Expr::ident("SharedConstant")]))).at(28, 2),
        // const enumValues = [SharedEnum.ONE, SharedEnum.TWO, SharedEnum.THREE];
        Stmt::local(
            "enumValues",
            None,
            Some(Expr::array(vec![
                Expr::member(Expr::ident("SharedEnum"), "ONE"),
                Expr::member(Expr::ident("SharedEnum"), "TWO"),
                Expr::member(Expr::ident("SharedEnum"), "THREE"),
            ])),
        )
        .at(31, 2),
        console_log(
            ["instance", "iface", "mixedArray", "prefixed", "enumValues"]
                .into_iter()
                .map(|name| Expr::ident(name))
                .collect(),
            33,
            2,
        ),
    ];

    SourceModule::new("another_consumer.ts")
        .with_import(import_shared())
        .with_item(
            Item::function("AnotherConsumerFunction", Function::new(vec![], body).returning(void()))
                .exported()
                .at(11, 0),
        )
}

pub fn clean() -> SourceModule {
    let clean_class = Class::new(vec![
        ClassMember::property("value", Some(string()), None).at(6, 2),
        ClassMember::method(
            "getValue",
            Function::new(vec![], vec![Stmt::ret(Expr::member(Expr::this(), "value")).at(13, 4)]).returning(string()),
        )
        .at(12, 2),
    ])
    .with_constructor(Function::new(
        vec![Param::new("initialValue").typed(string())],
        vec![Stmt::expr(Expr::assign(Expr::member(Expr::this(), "value"), Expr::ident("initialValue"))).at(9, 4)],
    ));

    let run_clean = Function::new(
        vec![],
        vec![
            Stmt::local(
                "instance",
                None,
                Some(Expr::construct(Expr::ident("CleanClass"), vec![Expr::string("test")])),
            )
            .at(18, 2),
            console_log(vec![Expr::method_call(Expr::ident("instance"), "getValue", vec![])], 19, 2),
            console_log(vec![Expr::call(Expr::ident("cleanFunction"), vec![])], 20, 2),
        ],
    )
    .returning(void());

    SourceModule::new("clean.ts")
        .with_item(
            Item::function(
                "cleanFunction",
                Function::new(vec![], vec![Stmt::ret(Expr::string("This is a clean function")).at(2, 2)])
                    .returning(string()),
            )
            .exported()
            .at(1, 0),
        )
        .with_item(Item::class("CleanClass", clean_class).exported().at(5, 0))
        .with_item(Item::function("runClean", run_clean).at(17, 0))
        .with_export(ExportDecl::Default {
            name: "runClean".into(),
            span: Span::point(23, 0),
        })
}

/// Line of the unreachable `console.log` in `main.ts`.
pub const UNREACHABLE_LINE: u32 = 3;

pub fn main_module() -> SourceModule {
    let test_class = Class::new(vec![
        ClassMember::property("property", Some(string()), None).at(14, 2),
        ClassMember::method(
            "method",
            Function::new(vec![], vec![console_log(vec![Expr::string("Method called")], 21, 4)]).returning(void()),
        )
        .at(20, 2),
    ])
    .implementing(TypeRef::new("TestInterface").at(13, 35))
    .with_constructor(Function::new(
        vec![],
        vec![Stmt::expr(Expr::assign(Expr::member(Expr::this(), "property"), Expr::string("test"))).at(17, 4)],
    ));

    SourceModule::new("main.ts")
        // export function TestFunction(): string {
        //   return "Hello, World!";
        //   console.log("Unreachable code");
        // }
        .with_item(
            Item::function(
                "TestFunction",
                Function::new(
                    vec![],
                    vec![
                        Stmt::ret(Expr::string("Hello, World!")).at(2, 2),
                        console_log(vec![Expr::string("Unreachable code")], UNREACHABLE_LINE, 2),
                    ],
                )
                .returning(string()),
            )
            .exported()
            .at(1, 0),
        )
        .with_item(
            Item::interface(
                "TestInterface",
                Interface::new(vec![
                    MemberSignature::method("method", 0).at(8, 2),
                    MemberSignature::property("property").at(9, 2),
                ]),
            )
            .exported()
            .at(7, 0),
        )
        .with_item(Item::class("TestClass", test_class).exported().at(13, 0))
        .with_item(Item::type_alias("TestType", TypeExpr::Union(vec![string(), number()])).exported().at(26, 0))
        .with_item(
            Item::constant("TestVariable", Constant::new(Expr::string("Test")).typed(string()))
                .exported()
                .at(29, 0),
        )
        .with_item(Item::constant("TestConstant", Constant::new(Expr::number(42.0))).exported().at(32, 0))
        .with_item(
            Item::function(
                "main",
                Function::new(
                    vec![],
                    vec![
                        console_log(vec![Expr::call(Expr::ident("TestFunction"), vec![])], 36, 2),
                        Stmt::local("instance", None, Some(Expr::construct(Expr::ident("TestClass"), vec![]))).at(37, 2),
                        Stmt::expr(Expr::method_call(Expr::ident("instance"), "method", vec![])).at(38, 2),
                    ],
                ),
            )
            .at(35, 0),
        )
        .with_statement(Stmt::expr(Expr::call(Expr::ident("main"), vec![])).at(41, 0))
}

/// Ids of the fixture modules inside a host.
pub struct Workspace {
    pub host: AnalysisHost,
    pub helper: ModuleId,
    pub consumer: ModuleId,
    pub another_consumer: ModuleId,
    pub clean: ModuleId,
    pub main: ModuleId,
}

/// Load the whole fixture into a fresh host.
pub fn workspace() -> Workspace {
    let mut host = AnalysisHost::new();
    let helper = host.set_module(helper()).unwrap();
    let consumer = host.set_module(consumer()).unwrap();
    let another_consumer = host.set_module(another_consumer()).unwrap();
    let clean = host.set_module(clean()).unwrap();
    let main = host.set_module(main_module()).unwrap();
    Workspace {
        host,
        helper,
        consumer,
        another_consumer,
        clean,
        main,
    }
}
